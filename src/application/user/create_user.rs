use std::sync::Arc;

use crate::domain::user::entities::{NewUser, User};
use crate::domain::user::errors::UserError;
use crate::domain::user::ports::UserPort;

/// Command for creating an account
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
  /// Display name, 2 to 100 characters
  pub name: String,
  /// Email address
  pub email: String,
}

/// Use case for creating an account
pub struct CreateUserUseCase {
  user_port: Arc<dyn UserPort>,
}

impl CreateUserUseCase {
  /// Creates a new instance of CreateUserUseCase
  pub fn new(user_port: Arc<dyn UserPort>) -> Self {
    Self { user_port }
  }

  /// Executes the account creation use case
  ///
  /// # Arguments
  /// * `command` - The name and email of the new account
  ///
  /// # Returns
  /// The created `User` with its assigned id
  ///
  /// # Errors
  /// Returns `UserError::InvalidUserData` without contacting the adapter when
  /// the data breaks the account rules, and `UserError::CreationFailed` for
  /// any adapter failure
  pub async fn execute(&self, command: CreateUserCommand) -> Result<User, UserError> {
    let new_user = NewUser::new(command.name, command.email);
    if !new_user.is_complete() {
      return Err(UserError::InvalidUserData);
    }

    let user = self.user_port.create(&new_user).await.map_err(|e| {
      tracing::error!("Failed to create user {}: {}", new_user.email, e);
      UserError::CreationFailed
    })?;

    tracing::info!("Created user {} ({})", user.email, user.id);
    Ok(user)
  }
}
