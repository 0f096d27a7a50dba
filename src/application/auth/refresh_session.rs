use std::fmt;
use std::sync::Arc;

use super::ensure_valid_session;
use crate::domain::auth::entities::AuthenticatedUser;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthPort;
use crate::domain::auth::services::ErrorMappingPolicy;

/// Command for renewing the current session
#[derive(Clone)]
pub struct RefreshSessionCommand {
  /// Refresh token of the session being renewed
  pub refresh_token: String,
}

impl fmt::Debug for RefreshSessionCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RefreshSessionCommand")
      .field("refresh_token", &"***")
      .finish()
  }
}

/// Use case for renewing the current session
pub struct RefreshSessionUseCase {
  auth_port: Arc<dyn AuthPort>,
}

impl RefreshSessionUseCase {
  /// Creates a new instance of RefreshSessionUseCase
  pub fn new(auth_port: Arc<dyn AuthPort>) -> Self {
    Self { auth_port }
  }

  /// Executes the session refresh use case
  ///
  /// # Returns
  /// The renewed session for the same identity
  ///
  /// # Errors
  /// Returns `AuthError::NoActiveSession` when nobody is logged in,
  /// `AuthError::InvalidSession` when the adapter returns an unusable session,
  /// and the refresh mapping of any adapter failure
  pub async fn execute(
    &self,
    command: RefreshSessionCommand,
  ) -> Result<AuthenticatedUser, AuthError> {
    let user = self
      .auth_port
      .refresh_token(&command.refresh_token)
      .await
      .map_err(|e| ErrorMappingPolicy::Refresh.map(e))?;

    ensure_valid_session(user)
  }
}
