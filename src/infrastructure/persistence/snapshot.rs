//! Persisted session snapshot
//!
//! The snapshot is the JSON record written after every successful
//! login, registration or refresh:
//!
//! ```json
//! {"id":"1","email":"admin@test.com","fullName":"Administrador Test",
//!  "accessToken":"...","refreshToken":"...","expiresAt":"2026-01-01T10:00:00Z"}
//! ```
//!
//! Readers treat anything that fails to decode or to rebuild a session as
//! absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::auth::entities::AuthenticatedUser;
use crate::domain::auth::errors::{StoreError, ValidationError};
use crate::domain::auth::ports::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
  pub id: String,
  pub email: String,
  pub full_name: String,
  pub access_token: String,
  pub refresh_token: String,
  pub expires_at: DateTime<Utc>,
}

impl SessionSnapshot {
  pub fn from_session(user: &AuthenticatedUser) -> Self {
    Self {
      id: user.id().to_string(),
      email: user.email().to_string(),
      full_name: user.full_name().to_string(),
      access_token: user.access_token().to_string(),
      refresh_token: user.refresh_token().to_string(),
      expires_at: user.expires_at(),
    }
  }

  pub fn encode(&self) -> Result<String, StoreError> {
    Ok(serde_json::to_string(self)?)
  }

  /// Parses a stored snapshot; `None` on any schema mismatch
  pub fn decode(raw: &str) -> Option<Self> {
    match serde_json::from_str(raw) {
      Ok(snapshot) => Some(snapshot),
      Err(e) => {
        tracing::warn!("Discarding unreadable session snapshot: {}", e);
        None
      }
    }
  }

  pub fn into_session(self) -> Result<AuthenticatedUser, ValidationError> {
    AuthenticatedUser::new(
      self.id,
      self.email,
      self.full_name,
      self.access_token,
      self.refresh_token,
      self.expires_at,
    )
  }
}

/// Reads and writes the current-session snapshot under a single key
pub struct SnapshotRepository {
  store: Arc<dyn SessionStore>,
  key: String,
}

impl SnapshotRepository {
  pub fn new(store: Arc<dyn SessionStore>, key: impl Into<String>) -> Self {
    Self {
      store,
      key: key.into(),
    }
  }

  pub fn key(&self) -> &str {
    &self.key
  }

  pub async fn save(&self, user: &AuthenticatedUser) -> Result<(), StoreError> {
    let raw = SessionSnapshot::from_session(user).encode()?;
    self.store.set(&self.key, &raw).await
  }

  pub async fn erase(&self) -> Result<(), StoreError> {
    self.store.remove(&self.key).await
  }

  /// Returns the stored session if it decodes and is still valid.
  ///
  /// A snapshot that is unreadable, fails validation or has expired is
  /// erased, and the result is `None`.
  pub async fn restore(&self) -> Result<Option<AuthenticatedUser>, StoreError> {
    let Some(raw) = self.store.get(&self.key).await? else {
      return Ok(None);
    };

    let restored = SessionSnapshot::decode(&raw).and_then(|snapshot| {
      snapshot
        .into_session()
        .map_err(|e| tracing::warn!("Stored session failed validation: {}", e))
        .ok()
    });

    match restored {
      Some(user) if user.is_valid() => {
        tracing::debug!("Restored session for {}", user.email());
        Ok(Some(user))
      }
      _ => {
        tracing::warn!("Discarding stale or corrupted session snapshot");
        self.erase().await?;
        Ok(None)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::InMemorySessionStore;
  use chrono::Duration;

  fn session() -> AuthenticatedUser {
    AuthenticatedUser::with_duration(
      "1",
      "admin@test.com",
      "Administrador Test",
      "access-token",
      "refresh-token",
      Duration::hours(1),
    )
    .unwrap()
  }

  #[test]
  fn test_snapshot_uses_camel_case_fields() {
    let raw = SessionSnapshot::from_session(&session()).encode().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    for field in [
      "id",
      "email",
      "fullName",
      "accessToken",
      "refreshToken",
      "expiresAt",
    ] {
      assert!(value.get(field).is_some(), "missing field {}", field);
    }
    assert!(value["expiresAt"].is_string());
  }

  #[test]
  fn test_snapshot_restores_same_session() {
    let original = session();
    let raw = SessionSnapshot::from_session(&original).encode().unwrap();

    let restored = SessionSnapshot::decode(&raw)
      .unwrap()
      .into_session()
      .unwrap();

    assert_eq!(restored, original);
    assert_eq!(restored.is_valid(), original.is_valid());
  }

  #[test]
  fn test_snapshot_reads_foreign_timestamp_format() {
    let raw = r#"{"id":"7","email":"x@y.com","fullName":"","accessToken":"a",
      "refreshToken":"r","expiresAt":"2020-01-01T00:00:00.000Z"}"#;

    let restored = SessionSnapshot::decode(raw).unwrap().into_session().unwrap();

    assert_eq!(restored.id(), "7");
    assert!(restored.is_expired());
  }

  #[test]
  fn test_decode_rejects_schema_mismatch() {
    assert!(SessionSnapshot::decode("not json").is_none());
    assert!(SessionSnapshot::decode(r#"{"id":"1"}"#).is_none());
    let bad_timestamp = r#"{"id":"1","email":"a@b.com","fullName":"","accessToken":"a",
      "refreshToken":"r","expiresAt":"yesterday"}"#;
    assert!(SessionSnapshot::decode(bad_timestamp).is_none());
  }

  #[test]
  fn test_invalid_snapshot_fails_reconstruction() {
    let raw = r#"{"id":"","email":"a@b.com","fullName":"","accessToken":"a",
      "refreshToken":"r","expiresAt":"2099-01-01T00:00:00Z"}"#;
    let snapshot = SessionSnapshot::decode(raw).unwrap();

    assert_eq!(snapshot.into_session(), Err(ValidationError::MissingId));
  }

  fn repository() -> (SnapshotRepository, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    (SnapshotRepository::new(store.clone(), "currentUser"), store)
  }

  #[tokio::test]
  async fn test_repository_save_and_restore() {
    let (repository, store) = repository();
    let user = session();

    repository.save(&user).await.unwrap();
    assert!(store.get("currentUser").await.unwrap().is_some());

    assert_eq!(repository.restore().await.unwrap(), Some(user));

    repository.erase().await.unwrap();
    assert_eq!(repository.restore().await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_repository_heals_corrupted_snapshot() {
    let (repository, store) = repository();
    store.set("currentUser", r#"{"id":"1"}"#).await.unwrap();

    assert_eq!(repository.restore().await.unwrap(), None);
    assert_eq!(store.get("currentUser").await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_repository_heals_expired_snapshot() {
    let (repository, store) = repository();
    let expired = AuthenticatedUser::new(
      "1",
      "admin@test.com",
      "",
      "a",
      "r",
      Utc::now() - Duration::seconds(1),
    )
    .unwrap();
    repository.save(&expired).await.unwrap();

    assert_eq!(repository.restore().await.unwrap(), None);
    assert_eq!(store.get("currentUser").await.unwrap(), None);
  }
}
