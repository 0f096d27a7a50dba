use std::sync::Arc;

use crate::domain::auth::entities::AuthenticatedUser;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthPort;

/// Use case for restoring the current session
pub struct GetCurrentUserUseCase {
  auth_port: Arc<dyn AuthPort>,
}

impl GetCurrentUserUseCase {
  /// Creates a new instance of GetCurrentUserUseCase
  pub fn new(auth_port: Arc<dyn AuthPort>) -> Self {
    Self { auth_port }
  }

  /// Returns the current session, or `None` when nobody is logged in
  ///
  /// # Errors
  /// Returns `AuthError::Store` if the session snapshot cannot be read
  pub async fn execute(&self) -> Result<Option<AuthenticatedUser>, AuthError> {
    let user = self.auth_port.get_current_user().await?;

    match &user {
      Some(user) => tracing::debug!("Restored session for {}", user.email()),
      None => tracing::debug!("No stored session"),
    }

    Ok(user)
  }
}
