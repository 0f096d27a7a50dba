use thiserror::Error;

use crate::domain::auth::errors::TransportError;

/// User management errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
  #[error("User data is not valid")]
  InvalidUserData,

  #[error("Could not create the user")]
  CreationFailed,

  #[error("Transport error: {0}")]
  Transport(#[from] TransportError),
}

impl From<reqwest::Error> for UserError {
  fn from(error: reqwest::Error) -> Self {
    UserError::Transport(TransportError::from(error))
  }
}
