use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::auth::entities::AuthenticatedUser;
use crate::domain::auth::errors::{AuthError, TransportError};
use crate::domain::auth::ports::AuthPort;
use crate::domain::auth::value_objects::{Credentials, RegistrationRequest};
use crate::infrastructure::persistence::{SessionSnapshot, SnapshotRepository};

#[derive(Serialize)]
struct LoginBody<'a> {
  email: &'a str,
  password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
  email: &'a str,
  password: &'a str,
  full_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
  refresh_token: &'a str,
}

/// Authentication adapter backed by a remote HTTP API.
///
/// Endpoints live under `{base_url}/auth` and answer successful calls with a
/// session in snapshot format. The current session is cached in memory and
/// persisted through the same [`SnapshotRepository`] the mock adapter uses.
pub struct HttpAuthAdapter {
  client: Client,
  base_url: String,
  current: Mutex<Option<AuthenticatedUser>>,
  snapshots: SnapshotRepository,
}

impl HttpAuthAdapter {
  pub fn new(
    base_url: impl Into<String>,
    timeout: Duration,
    snapshots: SnapshotRepository,
  ) -> Result<Self, AuthError> {
    let client = Client::builder().timeout(timeout).build()?;

    Ok(Self {
      client,
      base_url: base_url.into().trim_end_matches('/').to_string(),
      current: Mutex::new(None),
      snapshots,
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/auth/{}", self.base_url, path)
  }

  async fn post<B: Serialize + ?Sized>(
    &self,
    path: &str,
    body: &B,
    bearer: Option<&str>,
  ) -> Result<reqwest::Response, TransportError> {
    let url = self.url(path);
    tracing::debug!("POST {}", url);

    let mut request = self.client.post(&url).json(body);
    if let Some(token) = bearer {
      request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    tracing::warn!("POST {} failed with {}", url, status);
    Err(TransportError::from_status(status.as_u16(), message))
  }

  async fn post_for_session<B: Serialize + ?Sized>(
    &self,
    path: &str,
    body: &B,
    bearer: Option<&str>,
  ) -> Result<AuthenticatedUser, AuthError> {
    let response = self.post(path, body, bearer).await?;
    let snapshot: SessionSnapshot = response
      .json()
      .await
      .map_err(|e| TransportError::MalformedResponse(e.to_string()))?;

    parse_session(snapshot)
  }
}

fn parse_session(snapshot: SessionSnapshot) -> Result<AuthenticatedUser, AuthError> {
  snapshot.into_session().map_err(|e| {
    tracing::error!("Server returned an invalid session: {}", e);
    AuthError::InvalidSession
  })
}

/// Applies the port taxonomy to a login response
fn login_outcome(
  result: Result<AuthenticatedUser, AuthError>,
) -> Result<AuthenticatedUser, AuthError> {
  match result {
    Err(AuthError::Transport(TransportError::Unauthorized)) => {
      Err(AuthError::InvalidCredentials)
    }
    other => other,
  }
}

/// Applies the port taxonomy to a registration response
fn register_outcome(
  result: Result<AuthenticatedUser, AuthError>,
) -> Result<AuthenticatedUser, AuthError> {
  match result {
    Err(AuthError::Transport(TransportError::Conflict)) => {
      Err(AuthError::EmailAlreadyRegistered)
    }
    other => other,
  }
}

#[async_trait]
impl AuthPort for HttpAuthAdapter {
  async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError> {
    let mut current = self.current.lock().await;

    let body = LoginBody {
      email: credentials.email().as_str(),
      password: credentials.password(),
    };
    let user = login_outcome(self.post_for_session("login", &body, None).await)?;

    self.snapshots.save(&user).await?;
    *current = Some(user.clone());

    tracing::info!("User {} logged in", user.email());
    Ok(user)
  }

  async fn register(
    &self,
    request: &RegistrationRequest,
  ) -> Result<AuthenticatedUser, AuthError> {
    let mut current = self.current.lock().await;

    let body = RegisterBody {
      email: request.email().as_str(),
      password: request.password(),
      full_name: request.full_name(),
    };
    let user = register_outcome(self.post_for_session("register", &body, None).await)?;

    self.snapshots.save(&user).await?;
    *current = Some(user.clone());

    tracing::info!("Registered user {} ({})", user.email(), user.id());
    Ok(user)
  }

  async fn logout(&self) -> Result<bool, AuthError> {
    let mut current = self.current.lock().await;

    // Local state is cleared even when the server call fails
    let remote = match current.take() {
      Some(user) => self
        .post("logout", &serde_json::json!({}), Some(user.access_token()))
        .await
        .map(|_| ()),
      None => Ok(()),
    };

    if let Err(store_error) = self.snapshots.erase().await {
      if let Err(remote_error) = &remote {
        tracing::error!("Remote logout failed: {}", remote_error);
      }
      return Err(store_error.into());
    }
    remote?;

    tracing::info!("Logged out");
    Ok(true)
  }

  async fn get_current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
    let mut current = self.current.lock().await;
    let restored = self.snapshots.restore().await?;
    *current = restored.clone();
    Ok(restored)
  }

  async fn refresh_token(&self, refresh_token: &str) -> Result<AuthenticatedUser, AuthError> {
    let mut current = self.current.lock().await;
    let Some(active) = current.as_ref() else {
      return Err(AuthError::NoActiveSession);
    };

    let body = RefreshBody { refresh_token };
    let refreshed = self
      .post_for_session("refresh", &body, Some(active.access_token()))
      .await?;

    self.snapshots.save(&refreshed).await?;
    *current = Some(refreshed.clone());

    tracing::info!("Refreshed session for {}", refreshed.email());
    Ok(refreshed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::StoreError;
  use crate::infrastructure::persistence::InMemorySessionStore;
  use std::sync::Arc;

  fn adapter(base_url: &str) -> HttpAuthAdapter {
    HttpAuthAdapter::new(
      base_url,
      Duration::from_secs(1),
      SnapshotRepository::new(Arc::new(InMemorySessionStore::new()), "currentUser"),
    )
    .unwrap()
  }

  fn snapshot(id: &str) -> SessionSnapshot {
    SessionSnapshot {
      id: id.to_string(),
      email: "admin@test.com".to_string(),
      full_name: "Administrador Test".to_string(),
      access_token: "access".to_string(),
      refresh_token: "refresh".to_string(),
      expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
    }
  }

  #[test]
  fn test_url_building_trims_trailing_slash() {
    let adapter = adapter("http://localhost:3000/api/");
    assert_eq!(adapter.url("login"), "http://localhost:3000/api/auth/login");
  }

  #[test]
  fn test_request_bodies_use_camel_case() {
    let body = serde_json::to_value(RegisterBody {
      email: "a@b.com",
      password: "Secret123",
      full_name: "Jane",
    })
    .unwrap();
    assert_eq!(body["fullName"], "Jane");

    let body = serde_json::to_value(RefreshBody {
      refresh_token: "r",
    })
    .unwrap();
    assert_eq!(body["refreshToken"], "r");
  }

  #[test]
  fn test_parse_session_rejects_invalid_payload() {
    assert!(parse_session(snapshot("1")).is_ok());
    assert_eq!(
      parse_session(snapshot("")).unwrap_err(),
      AuthError::InvalidSession
    );
  }

  #[test]
  fn test_status_outcomes_follow_port_taxonomy() {
    assert_eq!(
      login_outcome(Err(TransportError::Unauthorized.into())).unwrap_err(),
      AuthError::InvalidCredentials
    );
    assert_eq!(
      login_outcome(Err(TransportError::Server { status: 500 }.into())).unwrap_err(),
      AuthError::Transport(TransportError::Server { status: 500 })
    );
    assert_eq!(
      register_outcome(Err(TransportError::Conflict.into())).unwrap_err(),
      AuthError::EmailAlreadyRegistered
    );
    assert_eq!(
      register_outcome(Err(TransportError::Unauthorized.into())).unwrap_err(),
      AuthError::Transport(TransportError::Unauthorized)
    );
  }

  #[tokio::test]
  async fn test_refresh_without_session_skips_network() {
    let adapter = adapter("http://127.0.0.1:9");

    assert_eq!(
      adapter.refresh_token("r").await.unwrap_err(),
      AuthError::NoActiveSession
    );
  }

  #[tokio::test]
  async fn test_logout_without_session_is_local() {
    let adapter = adapter("http://127.0.0.1:9");

    assert!(adapter.logout().await.unwrap());
    assert!(adapter.logout().await.unwrap());
    assert_eq!(adapter.get_current_user().await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_unreachable_server_is_a_transport_error() {
    let adapter = adapter("http://127.0.0.1:9");
    let credentials = Credentials::new("admin@test.com", "Admin123").unwrap();

    assert!(matches!(
      adapter.login(&credentials).await,
      Err(AuthError::Transport(TransportError::Connection(_)))
    ));
  }

  struct BrokenStore;

  #[async_trait]
  impl crate::domain::auth::ports::SessionStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
      Err(StoreError::Unavailable("down".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
      Err(StoreError::Unavailable("down".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
      Err(StoreError::Unavailable("down".into()))
    }
  }

  #[tokio::test]
  async fn test_logout_reports_store_failure_after_remote_failure() {
    let adapter = HttpAuthAdapter::new(
      "http://127.0.0.1:9",
      Duration::from_secs(1),
      SnapshotRepository::new(Arc::new(BrokenStore), "currentUser"),
    )
    .unwrap();
    *adapter.current.lock().await = Some(parse_session(snapshot("1")).unwrap());

    assert_eq!(
      adapter.logout().await.unwrap_err(),
      AuthError::Store(StoreError::Unavailable("down".into()))
    );
    assert!(adapter.current.lock().await.is_none());
  }
}
