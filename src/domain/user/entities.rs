use serde::{Deserialize, Serialize};

use crate::domain::auth::value_objects::validate_email;

/// Account record managed through [`UserPort`](super::ports::UserPort)
///
/// Records come from outside and are not validated on construction; callers
/// check [`User::is_complete`] before relying on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: String,
  pub name: String,
  pub email: String,
}

impl User {
  pub const MIN_NAME_LENGTH: usize = 2;
  pub const MAX_NAME_LENGTH: usize = 100;

  pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      name: name.into(),
      email: email.into(),
    }
  }

  pub fn is_valid_email(&self) -> bool {
    validate_email(&self.email).is_ok()
  }

  /// Name length in characters, untrimmed
  pub fn is_valid_name(&self) -> bool {
    is_valid_name(&self.name)
  }

  /// Whether both the email and the name satisfy the account rules
  pub fn is_complete(&self) -> bool {
    self.is_valid_email() && self.is_valid_name()
  }
}

fn is_valid_name(name: &str) -> bool {
  (User::MIN_NAME_LENGTH..=User::MAX_NAME_LENGTH).contains(&name.chars().count())
}

/// Data for an account that does not have an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
  pub name: String,
  pub email: String,
}

impl NewUser {
  pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      email: email.into(),
    }
  }

  pub fn is_complete(&self) -> bool {
    validate_email(&self.email).is_ok() && is_valid_name(&self.name)
  }
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
}
