use async_trait::async_trait;

use super::entities::{NewUser, User, UserUpdate};
use super::errors::UserError;

/// User management capability
///
/// `get_by_id` reports a missing account as `Ok(None)`; every other failure
/// is a [`UserError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPort: Send + Sync {
  /// Lists every account
  async fn get_all(&self) -> Result<Vec<User>, UserError>;

  /// Finds one account by id
  async fn get_by_id(&self, id: &str) -> Result<Option<User>, UserError>;

  /// Creates an account and returns it with its assigned id
  async fn create(&self, user: &NewUser) -> Result<User, UserError>;

  /// Applies a partial update and returns the stored account
  async fn update(&self, id: &str, changes: &UserUpdate) -> Result<User, UserError>;

  /// Deletes an account
  async fn delete(&self, id: &str) -> Result<bool, UserError>;
}
