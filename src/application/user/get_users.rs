use std::sync::Arc;

use crate::domain::user::entities::User;
use crate::domain::user::errors::UserError;
use crate::domain::user::ports::UserPort;

/// Use case for listing accounts
pub struct GetUsersUseCase {
  user_port: Arc<dyn UserPort>,
}

impl GetUsersUseCase {
  /// Creates a new instance of GetUsersUseCase
  pub fn new(user_port: Arc<dyn UserPort>) -> Self {
    Self { user_port }
  }

  /// Returns every account that passes the account rules
  ///
  /// Incomplete records are dropped from the result and logged.
  ///
  /// # Errors
  /// Returns `UserError` if the adapter fails to list accounts
  pub async fn execute(&self) -> Result<Vec<User>, UserError> {
    let users = self.user_port.get_all().await?;
    let total = users.len();

    let complete: Vec<User> = users.into_iter().filter(User::is_complete).collect();
    if complete.len() < total {
      tracing::warn!(
        "Dropped {} incomplete user records",
        total - complete.len()
      );
    }

    Ok(complete)
  }
}
