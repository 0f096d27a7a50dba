use std::fmt;
use std::sync::Arc;

use super::ensure_valid_session;
use crate::domain::auth::entities::AuthenticatedUser;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthPort;
use crate::domain::auth::services::ErrorMappingPolicy;
use crate::domain::auth::value_objects::RegistrationRequest;

/// Command for registering a new user
#[derive(Clone)]
pub struct RegisterUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
  /// Password confirmation, must equal `password`
  pub confirm_password: String,
  /// User's display name
  pub full_name: String,
  /// Whether the terms and conditions were accepted
  pub accept_terms: bool,
}

impl fmt::Debug for RegisterUserCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RegisterUserCommand")
      .field("email", &self.email)
      .field("password", &"***")
      .field("confirm_password", &"***")
      .field("full_name", &self.full_name)
      .field("accept_terms", &self.accept_terms)
      .finish()
  }
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_port: Arc<dyn AuthPort>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_port: Arc<dyn AuthPort>) -> Self {
    Self { auth_port }
  }

  /// Executes the user registration use case
  ///
  /// # Arguments
  /// * `command` - The registration command containing user details
  ///
  /// # Returns
  /// The session opened for the new account
  ///
  /// # Errors
  /// Returns `AuthError::TermsNotAccepted` before anything else is checked,
  /// `AuthError::Validation` for the first violated registration rule, and the
  /// registration mapping of any adapter failure
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<AuthenticatedUser, AuthError> {
    if !command.accept_terms {
      return Err(AuthError::TermsNotAccepted);
    }

    let request = RegistrationRequest::new(
      command.email,
      command.password,
      command.confirm_password,
      command.full_name,
    )?;

    tracing::debug!("Registration attempt for {}", request.email());

    let user = self
      .auth_port
      .register(&request)
      .await
      .map_err(|e| ErrorMappingPolicy::Register.map(e))?;

    ensure_valid_session(user)
  }
}
