use async_trait::async_trait;

use super::entities::AuthenticatedUser;
use super::errors::{AuthError, StoreError};
use super::value_objects::{Credentials, RegistrationRequest};

/// Authentication capability implemented by session adapters.
///
/// Every operation resolves exactly once with either a value or an
/// [`AuthError`]. Adapters report `InvalidCredentials`,
/// `EmailAlreadyRegistered` and `NoActiveSession` for the matching business
/// failures and `Transport`/`Store` for everything technical.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
  /// Authenticates a user and opens a session
  async fn login(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError>;

  /// Creates an account and opens a session for it
  async fn register(&self, request: &RegistrationRequest)
  -> Result<AuthenticatedUser, AuthError>;

  /// Closes the current session and erases any persisted snapshot
  async fn logout(&self) -> Result<bool, AuthError>;

  /// Restores the current session, if any
  async fn get_current_user(&self) -> Result<Option<AuthenticatedUser>, AuthError>;

  /// Replaces the current session with a freshly minted one
  async fn refresh_token(&self, refresh_token: &str) -> Result<AuthenticatedUser, AuthError>;

  /// Whether a present and valid session exists
  async fn is_authenticated(&self) -> Result<bool, AuthError> {
    Ok(
      self
        .get_current_user()
        .await?
        .is_some_and(|user| user.is_valid()),
    )
  }
}

/// Key-value store holding serialized session snapshots
#[async_trait]
pub trait SessionStore: Send + Sync {
  /// Reads the value stored under `key`
  async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  /// Writes `value` under `key`, replacing any previous value
  async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

  /// Removes `key`; removing a missing key succeeds
  async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Service trait for opaque token generation
#[async_trait]
pub trait TokenGenerator: Send + Sync {
  /// Generates a random opaque token
  async fn generate(&self) -> Result<String, AuthError>;
}
