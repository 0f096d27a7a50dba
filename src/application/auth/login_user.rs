use std::fmt;
use std::sync::Arc;

use super::ensure_valid_session;
use crate::domain::auth::entities::AuthenticatedUser;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthPort;
use crate::domain::auth::services::ErrorMappingPolicy;
use crate::domain::auth::value_objects::Credentials;

/// Command for logging in a user
#[derive(Clone)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
  /// Whether the caller asked for a long-lived session
  pub remember_me: bool,
}

impl fmt::Debug for LoginUserCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("LoginUserCommand")
      .field("email", &self.email)
      .field("password", &"***")
      .field("remember_me", &self.remember_me)
      .finish()
  }
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_port: Arc<dyn AuthPort>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(auth_port: Arc<dyn AuthPort>) -> Self {
    Self { auth_port }
  }

  /// Executes the user login use case
  ///
  /// # Arguments
  /// * `command` - The login command containing credentials
  ///
  /// # Returns
  /// The newly opened `AuthenticatedUser` session
  ///
  /// # Errors
  /// Returns `AuthError::MalformedCredentials` without contacting the adapter
  /// when the input is malformed, `AuthError::InvalidSession` when the adapter
  /// returns an unusable session, and the login mapping of any adapter failure
  pub async fn execute(&self, command: LoginUserCommand) -> Result<AuthenticatedUser, AuthError> {
    let credentials =
      Credentials::new(command.email, command.password).map_err(AuthError::MalformedCredentials)?;

    tracing::debug!(
      "Login attempt for {} (remember_me: {})",
      credentials.email(),
      command.remember_me
    );

    let user = self
      .auth_port
      .login(&credentials)
      .await
      .map_err(|e| ErrorMappingPolicy::Login.map(e))?;

    ensure_valid_session(user)
  }
}
