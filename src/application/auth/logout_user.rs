use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthPort;

/// Use case for logging out the current user
pub struct LogoutUserUseCase {
  auth_port: Arc<dyn AuthPort>,
}

impl LogoutUserUseCase {
  /// Creates a new instance of LogoutUserUseCase
  pub fn new(auth_port: Arc<dyn AuthPort>) -> Self {
    Self { auth_port }
  }

  /// Executes the user logout use case
  ///
  /// Logging out without a session succeeds as well.
  ///
  /// # Errors
  /// Returns `AuthError` if the adapter fails to close the session
  pub async fn execute(&self) -> Result<bool, AuthError> {
    tracing::debug!("Logging out");
    self.auth_port.logout().await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::test_support::mock_adapter;
  use crate::domain::auth::value_objects::Credentials;

  #[tokio::test]
  async fn test_logout_twice_succeeds() {
    let adapter = mock_adapter();
    adapter
      .login(&Credentials::new("admin@test.com", "Admin123").unwrap())
      .await
      .unwrap();
    let use_case = LogoutUserUseCase::new(adapter.clone());

    assert!(use_case.execute().await.unwrap());
    assert!(use_case.execute().await.unwrap());
    assert_eq!(adapter.get_current_user().await.unwrap(), None);
  }
}
