//! Mock authentication adapter for development/testing
//!
//! Simulates a backend without contacting one: accounts live in an
//! in-process [`UserDirectory`], network latency is a configurable sleep, and
//! the current session is persisted through a [`SnapshotRepository`] so it
//! can be restored by a later adapter instance.

use async_trait::async_trait;
use chrono::Duration;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::directory::UserDirectory;
use crate::domain::auth::entities::AuthenticatedUser;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{AuthPort, TokenGenerator};
use crate::domain::auth::value_objects::{Credentials, RegistrationRequest};
use crate::infrastructure::persistence::SnapshotRepository;

/// How `refresh_token` treats the presented refresh token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshTokenPolicy {
  /// Any value refreshes the current session
  #[default]
  AcceptAny,
  /// The value must equal the current session's refresh token
  RequireMatch,
}

/// Artificial latency applied before each operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedDelays {
  pub login: std::time::Duration,
  pub register: std::time::Duration,
  pub logout: std::time::Duration,
  pub refresh: std::time::Duration,
}

impl SimulatedDelays {
  pub fn none() -> Self {
    Self {
      login: std::time::Duration::ZERO,
      register: std::time::Duration::ZERO,
      logout: std::time::Duration::ZERO,
      refresh: std::time::Duration::ZERO,
    }
  }
}

impl Default for SimulatedDelays {
  fn default() -> Self {
    Self {
      login: std::time::Duration::from_millis(1000),
      register: std::time::Duration::from_millis(1500),
      logout: std::time::Duration::from_millis(500),
      refresh: std::time::Duration::from_millis(800),
    }
  }
}

#[derive(Debug, Clone)]
pub struct MockAuthSettings {
  pub delays: SimulatedDelays,
  pub session_ttl: Duration,
  pub refresh_token_policy: RefreshTokenPolicy,
}

impl Default for MockAuthSettings {
  fn default() -> Self {
    Self {
      delays: SimulatedDelays::default(),
      session_ttl: Duration::hours(1),
      refresh_token_policy: RefreshTokenPolicy::default(),
    }
  }
}

struct SessionState {
  current: Option<AuthenticatedUser>,
  directory: UserDirectory,
}

/// In-memory implementation of [`AuthPort`].
///
/// The current-session slot and the directory sit behind one mutex. Each
/// operation holds it across "read current, compute, persist snapshot, write
/// current", so the snapshot always matches the last committed session.
pub struct MockAuthAdapter {
  state: Mutex<SessionState>,
  snapshots: SnapshotRepository,
  tokens: Arc<dyn TokenGenerator>,
  settings: MockAuthSettings,
}

impl MockAuthAdapter {
  pub fn new(
    directory: UserDirectory,
    snapshots: SnapshotRepository,
    tokens: Arc<dyn TokenGenerator>,
    settings: MockAuthSettings,
  ) -> Self {
    Self {
      state: Mutex::new(SessionState {
        current: None,
        directory,
      }),
      snapshots,
      tokens,
      settings,
    }
  }

  /// Number of accounts currently on file
  pub async fn directory_size(&self) -> usize {
    self.state.lock().await.directory.len()
  }

  async fn simulate_latency(&self, delay: std::time::Duration) {
    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }
  }

  async fn mint_session(
    &self,
    id: &str,
    email: &str,
    full_name: &str,
  ) -> Result<AuthenticatedUser, AuthError> {
    let access_token = self.tokens.generate().await?;
    let refresh_token = self.tokens.generate().await?;

    Ok(AuthenticatedUser::with_duration(
      id,
      email,
      full_name,
      access_token,
      refresh_token,
      self.settings.session_ttl,
    )?)
  }
}

#[async_trait]
impl AuthPort for MockAuthAdapter {
  async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError> {
    self.simulate_latency(self.settings.delays.login).await;

    let mut state = self.state.lock().await;
    let entry = state
      .directory
      .find_by_credentials(credentials)
      .cloned()
      .ok_or_else(|| {
        tracing::warn!("Login rejected for {}", credentials.email());
        AuthError::InvalidCredentials
      })?;

    let user = self
      .mint_session(&entry.id, &entry.email, &entry.full_name)
      .await?;
    self.snapshots.save(&user).await?;
    state.current = Some(user.clone());

    tracing::info!("User {} logged in", user.email());
    Ok(user)
  }

  async fn register(
    &self,
    request: &RegistrationRequest,
  ) -> Result<AuthenticatedUser, AuthError> {
    self.simulate_latency(self.settings.delays.register).await;

    let mut state = self.state.lock().await;
    if state.directory.contains_email(request.email().as_str()) {
      tracing::warn!("Registration rejected, {} already on file", request.email());
      return Err(AuthError::EmailAlreadyRegistered);
    }

    let id = Uuid::new_v4().to_string();
    let user = self
      .mint_session(&id, request.email().as_str(), request.full_name())
      .await?;
    self.snapshots.save(&user).await?;

    state.directory.append(id, request);
    state.current = Some(user.clone());

    tracing::info!("Registered user {} ({})", user.email(), user.id());
    Ok(user)
  }

  async fn logout(&self) -> Result<bool, AuthError> {
    self.simulate_latency(self.settings.delays.logout).await;

    let mut state = self.state.lock().await;
    self.snapshots.erase().await?;

    if let Some(user) = state.current.take() {
      tracing::info!("User {} logged out", user.email());
    }
    Ok(true)
  }

  async fn get_current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
    let mut state = self.state.lock().await;
    let restored = self.snapshots.restore().await?;
    state.current = restored.clone();
    Ok(restored)
  }

  async fn refresh_token(&self, refresh_token: &str) -> Result<AuthenticatedUser, AuthError> {
    self.simulate_latency(self.settings.delays.refresh).await;

    let mut state = self.state.lock().await;
    let current = state.current.clone().ok_or(AuthError::NoActiveSession)?;

    if self.settings.refresh_token_policy == RefreshTokenPolicy::RequireMatch
      && current.refresh_token() != refresh_token
    {
      tracing::warn!("Refresh token mismatch for {}", current.email());
      return Err(AuthError::RefreshTokenMismatch);
    }

    let access_token = self.tokens.generate().await?;
    let next_refresh_token = self.tokens.generate().await?;
    let refreshed = current.renewed(access_token, next_refresh_token, self.settings.session_ttl)?;

    self.snapshots.save(&refreshed).await?;
    state.current = Some(refreshed.clone());

    tracing::info!("Refreshed session for {}", refreshed.email());
    Ok(refreshed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::errors::StoreError;
  use crate::domain::auth::ports::SessionStore;
  use crate::infrastructure::auth::directory::default_seed_users;
  use crate::infrastructure::persistence::{InMemorySessionStore, SessionSnapshot};
  use crate::infrastructure::security::SecureTokenGenerator;

  const KEY: &str = "currentUser";

  fn settings() -> MockAuthSettings {
    MockAuthSettings {
      delays: SimulatedDelays::none(),
      ..MockAuthSettings::default()
    }
  }

  fn adapter_with(store: Arc<InMemorySessionStore>, settings: MockAuthSettings) -> MockAuthAdapter {
    MockAuthAdapter::new(
      UserDirectory::new(default_seed_users()),
      SnapshotRepository::new(store, KEY),
      Arc::new(SecureTokenGenerator::with_prefix("mock_")),
      settings,
    )
  }

  fn adapter() -> (MockAuthAdapter, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    (adapter_with(store.clone(), settings()), store)
  }

  fn admin() -> Credentials {
    Credentials::new("admin@test.com", "Admin123").unwrap()
  }

  fn registration(email: &str) -> RegistrationRequest {
    RegistrationRequest::new(email, "Secret123", "Secret123", "New User").unwrap()
  }

  #[tokio::test]
  async fn test_login_mints_and_persists_session() {
    let (adapter, store) = adapter();

    let user = adapter.login(&admin()).await.unwrap();

    assert_eq!(user.id(), "1");
    assert_eq!(user.email(), "admin@test.com");
    assert_eq!(user.full_name(), "Administrador Test");
    assert!(!user.access_token().is_empty());
    assert!(!user.refresh_token().is_empty());
    assert_ne!(user.access_token(), user.refresh_token());
    assert!(!user.is_expired());
    assert!(user.time_until_expiration() <= Duration::hours(1));

    let raw = store.get(KEY).await.unwrap().unwrap();
    let persisted = SessionSnapshot::decode(&raw).unwrap().into_session().unwrap();
    assert_eq!(persisted, user);
  }

  #[tokio::test]
  async fn test_login_rejects_unknown_account() {
    let (adapter, store) = adapter();
    let credentials = Credentials::new("nobody@test.com", "whatever").unwrap();

    let result = adapter.login(&credentials).await;

    assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    assert_eq!(store.get(KEY).await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_failed_login_keeps_existing_snapshot() {
    let (adapter, store) = adapter();
    adapter.login(&admin()).await.unwrap();
    let before = store.get(KEY).await.unwrap();

    let wrong = Credentials::new("admin@test.com", "admin123").unwrap();
    assert_eq!(
      adapter.login(&wrong).await.unwrap_err(),
      AuthError::InvalidCredentials
    );

    assert_eq!(store.get(KEY).await.unwrap(), before);
  }

  #[tokio::test]
  async fn test_register_appends_entry_and_logs_in() {
    let (adapter, store) = adapter();

    let user = adapter.register(&registration("new@test.com")).await.unwrap();

    assert_eq!(user.email(), "new@test.com");
    assert_eq!(user.full_name(), "New User");
    assert!(Uuid::parse_str(user.id()).is_ok());
    assert_eq!(adapter.directory_size().await, 3);
    assert!(store.get(KEY).await.unwrap().is_some());

    // The new account can log in afterwards
    let credentials = Credentials::new("new@test.com", "Secret123").unwrap();
    let again = adapter.login(&credentials).await.unwrap();
    assert_eq!(again.id(), user.id());
  }

  #[tokio::test]
  async fn test_register_rejects_duplicate_email() {
    let (adapter, store) = adapter();

    let result = adapter.register(&registration("admin@test.com")).await;

    assert_eq!(result.unwrap_err(), AuthError::EmailAlreadyRegistered);
    assert_eq!(adapter.directory_size().await, 2);
    assert_eq!(store.get(KEY).await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_logout_is_idempotent() {
    let (adapter, store) = adapter();
    adapter.login(&admin()).await.unwrap();

    assert!(adapter.logout().await.unwrap());
    assert!(adapter.logout().await.unwrap());

    assert_eq!(store.get(KEY).await.unwrap(), None);
    assert_eq!(adapter.get_current_user().await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_current_user_restored_by_new_instance() {
    let (adapter, store) = adapter();
    let user = adapter.login(&admin()).await.unwrap();

    let restarted = adapter_with(store, settings());
    let restored = restarted.get_current_user().await.unwrap();

    assert_eq!(restored, Some(user.clone()));
    assert!(restarted.is_authenticated().await.unwrap());

    // Restoring adopts the session, so it can be refreshed
    let refreshed = restarted.refresh_token(user.refresh_token()).await.unwrap();
    assert_eq!(refreshed.id(), user.id());
  }

  #[tokio::test]
  async fn test_corrupted_snapshot_is_discarded() {
    let (adapter, store) = adapter();
    store.set(KEY, "{not json").await.unwrap();

    assert_eq!(adapter.get_current_user().await.unwrap(), None);
    assert_eq!(store.get(KEY).await.unwrap(), None);
    assert!(!adapter.is_authenticated().await.unwrap());
  }

  #[tokio::test]
  async fn test_expired_snapshot_is_discarded() {
    let (adapter, store) = adapter();
    let expired = AuthenticatedUser::new(
      "1",
      "admin@test.com",
      "Administrador Test",
      "a",
      "r",
      chrono::Utc::now() - Duration::minutes(5),
    )
    .unwrap();
    store
      .set(KEY, &SessionSnapshot::from_session(&expired).encode().unwrap())
      .await
      .unwrap();

    assert_eq!(adapter.get_current_user().await.unwrap(), None);
    assert_eq!(store.get(KEY).await.unwrap(), None);

    // Nothing was adopted, so there is nothing to refresh
    assert_eq!(
      adapter.refresh_token("r").await.unwrap_err(),
      AuthError::NoActiveSession
    );
  }

  #[tokio::test]
  async fn test_refresh_without_session() {
    let (adapter, _store) = adapter();

    assert_eq!(
      adapter.refresh_token("anything").await.unwrap_err(),
      AuthError::NoActiveSession
    );
  }

  #[tokio::test]
  async fn test_refresh_replaces_tokens_and_snapshot() {
    let (adapter, store) = adapter();
    let user = adapter.login(&admin()).await.unwrap();

    // Any value is accepted by default
    let refreshed = adapter.refresh_token("not-the-real-token").await.unwrap();

    assert_eq!(refreshed.id(), user.id());
    assert_eq!(refreshed.email(), user.email());
    assert_ne!(refreshed.access_token(), user.access_token());
    assert_ne!(refreshed.refresh_token(), user.refresh_token());
    assert!(refreshed.expires_at() >= user.expires_at());

    let raw = store.get(KEY).await.unwrap().unwrap();
    let persisted = SessionSnapshot::decode(&raw).unwrap().into_session().unwrap();
    assert_eq!(persisted, refreshed);
  }

  #[tokio::test]
  async fn test_refresh_requires_matching_token_when_configured() {
    let store = Arc::new(InMemorySessionStore::new());
    let adapter = adapter_with(
      store,
      MockAuthSettings {
        refresh_token_policy: RefreshTokenPolicy::RequireMatch,
        ..settings()
      },
    );
    let user = adapter.login(&admin()).await.unwrap();

    assert_eq!(
      adapter.refresh_token("stale").await.unwrap_err(),
      AuthError::RefreshTokenMismatch
    );

    let refreshed = adapter.refresh_token(user.refresh_token()).await.unwrap();

    // The previous refresh token is no longer current
    assert_eq!(
      adapter.refresh_token(user.refresh_token()).await.unwrap_err(),
      AuthError::RefreshTokenMismatch
    );
    assert!(adapter.refresh_token(refreshed.refresh_token()).await.is_ok());
  }

  #[tokio::test]
  async fn test_concurrent_refreshes_leave_consistent_snapshot() {
    let store = Arc::new(InMemorySessionStore::new());
    let adapter = Arc::new(adapter_with(store.clone(), settings()));
    adapter.login(&admin()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
      let adapter = adapter.clone();
      handles.push(tokio::spawn(async move {
        adapter.refresh_token("any").await
      }));
    }
    for handle in handles {
      handle.await.unwrap().unwrap();
    }

    let current = adapter.get_current_user().await.unwrap().unwrap();
    let raw = store.get(KEY).await.unwrap().unwrap();
    let persisted = SessionSnapshot::decode(&raw).unwrap().into_session().unwrap();
    assert_eq!(persisted, current);
  }

  struct UnreachableStore;

  #[async_trait]
  impl SessionStore for UnreachableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
      Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
      Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
      Err(StoreError::Unavailable("connection refused".into()))
    }
  }

  #[tokio::test]
  async fn test_unreachable_store_surfaces_errors() {
    let adapter = MockAuthAdapter::new(
      UserDirectory::new(default_seed_users()),
      SnapshotRepository::new(Arc::new(UnreachableStore), KEY),
      Arc::new(SecureTokenGenerator::new()),
      settings(),
    );

    assert!(matches!(
      adapter.login(&admin()).await,
      Err(AuthError::Store(StoreError::Unavailable(_)))
    ));
    assert!(matches!(
      adapter.logout().await,
      Err(AuthError::Store(_))
    ));

    // A failed registration leaves the directory untouched
    assert!(adapter.register(&registration("new@test.com")).await.is_err());
    assert_eq!(adapter.directory_size().await, 2);

    // A failed login never set the current session
    assert_eq!(
      adapter.refresh_token("r").await.unwrap_err(),
      AuthError::NoActiveSession
    );
  }

  #[tokio::test]
  async fn test_unusable_ttl_leaves_no_session_behind() {
    let store = Arc::new(InMemorySessionStore::new());
    let adapter = adapter_with(
      store.clone(),
      MockAuthSettings {
        session_ttl: Duration::zero(),
        ..settings()
      },
    );

    assert!(matches!(
      adapter.login(&admin()).await,
      Err(AuthError::Validation(_))
    ));
    assert_eq!(store.get(KEY).await.unwrap(), None);
    assert_eq!(
      adapter.refresh_token("x").await.unwrap_err(),
      AuthError::NoActiveSession
    );
  }
}
