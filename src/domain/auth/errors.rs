use thiserror::Error;

/// Main authentication error type
///
/// Adapters fail with the port-level variants (`InvalidCredentials`,
/// `EmailAlreadyRegistered`, `NoActiveSession`, `Transport`, `Store`). Use cases
/// surface the validation variants and run everything else through an
/// [`ErrorMappingPolicy`](super::services::ErrorMappingPolicy).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("Invalid credentials")]
  MalformedCredentials(#[source] ValidationError),

  #[error("Terms and conditions must be accepted")]
  TermsNotAccepted,

  #[error("Incorrect email or password")]
  InvalidCredentials,

  #[error("Email is already registered")]
  EmailAlreadyRegistered,

  #[error("No active session")]
  NoActiveSession,

  #[error("Refresh token does not match the active session")]
  RefreshTokenMismatch,

  #[error("Authenticated session is invalid")]
  InvalidSession,

  #[error("Access denied")]
  AccessDenied,

  #[error("Invalid registration data")]
  InvalidRegistrationData,

  #[error("Internal server error. Please try again later")]
  ServerUnavailable,

  #[error("Login failed. Please try again")]
  LoginFailed,

  #[error("Registration failed. Please try again")]
  RegistrationFailed,

  #[error("Session refresh failed. Please log in again")]
  RefreshFailed,

  #[error("Transport error: {0}")]
  Transport(#[from] TransportError),

  #[error("Session store error: {0}")]
  Store(#[from] StoreError),

  #[error("Invalid configuration: {0}")]
  Configuration(String),
}

impl AuthError {
  /// Whether the caller can recover locally by correcting its input
  pub fn is_input_error(&self) -> bool {
    matches!(
      self,
      Self::Validation(_) | Self::MalformedCredentials(_) | Self::TermsNotAccepted
    )
  }
}

/// Value object and entity validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Invalid email format")]
  InvalidEmail,

  #[error("Password too short, minimum {min} characters required")]
  PasswordTooShort { min: usize },

  #[error("Password must contain uppercase letters, lowercase letters and digits")]
  PasswordTooWeak,

  #[error("Passwords do not match")]
  PasswordMismatch,

  #[error("Full name too short, minimum {min} characters required")]
  FullNameTooShort { min: usize },

  #[error("User id is required")]
  MissingId,

  #[error("Access token is required")]
  MissingAccessToken,

  #[error("Session lifetime must be positive and within the supported date range")]
  InvalidSessionTtl,
}

/// Coarse classification of a transport failure, used by the mapping tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
  Unauthorized,
  Forbidden,
  Conflict,
  BadRequest,
  ServerFault,
  Unknown,
}

/// Failures raised by a transport-backed adapter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
  #[error("401 Unauthorized")]
  Unauthorized,

  #[error("403 Forbidden")]
  Forbidden,

  #[error("409 Conflict")]
  Conflict,

  #[error("400 Bad Request: {0}")]
  BadRequest(String),

  #[error("{status} Server Error")]
  Server { status: u16 },

  #[error("Unexpected status {status}: {message}")]
  UnexpectedStatus { status: u16, message: String },

  #[error("Connection failed: {0}")]
  Connection(String),

  #[error("Malformed response: {0}")]
  MalformedResponse(String),
}

impl TransportError {
  /// Builds the error matching an HTTP status code
  pub fn from_status(status: u16, message: impl Into<String>) -> Self {
    match status {
      400 => Self::BadRequest(message.into()),
      401 => Self::Unauthorized,
      403 => Self::Forbidden,
      409 => Self::Conflict,
      500..=599 => Self::Server { status },
      _ => Self::UnexpectedStatus {
        status,
        message: message.into(),
      },
    }
  }

  pub fn class(&self) -> FailureClass {
    match self {
      Self::Unauthorized => FailureClass::Unauthorized,
      Self::Forbidden => FailureClass::Forbidden,
      Self::Conflict => FailureClass::Conflict,
      Self::BadRequest(_) => FailureClass::BadRequest,
      Self::Server { .. } => FailureClass::ServerFault,
      Self::UnexpectedStatus { .. } | Self::Connection(_) | Self::MalformedResponse(_) => {
        FailureClass::Unknown
      }
    }
  }
}

impl From<reqwest::Error> for TransportError {
  fn from(error: reqwest::Error) -> Self {
    if let Some(status) = error.status() {
      return TransportError::from_status(status.as_u16(), error.to_string());
    }
    if error.is_decode() {
      return TransportError::MalformedResponse(error.to_string());
    }
    TransportError::Connection(error.to_string())
  }
}

impl From<reqwest::Error> for AuthError {
  fn from(error: reqwest::Error) -> Self {
    AuthError::Transport(TransportError::from(error))
  }
}

/// Session store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  #[error("Session store unreachable: {0}")]
  Unavailable(String),

  #[error("Session store I/O failed: {0}")]
  Io(String),

  #[error("Failed to encode session snapshot: {0}")]
  Encode(String),
}

impl From<std::io::Error> for StoreError {
  fn from(error: std::io::Error) -> Self {
    StoreError::Io(error.to_string())
  }
}

impl From<redis::RedisError> for StoreError {
  fn from(error: redis::RedisError) -> Self {
    if error.is_connection_refusal() || error.is_connection_dropped() || error.is_timeout() {
      StoreError::Unavailable(error.to_string())
    } else {
      StoreError::Io(error.to_string())
    }
  }
}

impl From<serde_json::Error> for StoreError {
  fn from(error: serde_json::Error) -> Self {
    StoreError::Encode(error.to_string())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_transport_error_from_status() {
    assert_eq!(
      TransportError::from_status(401, "nope"),
      TransportError::Unauthorized
    );
    assert_eq!(
      TransportError::from_status(409, "dup"),
      TransportError::Conflict
    );
    assert_eq!(
      TransportError::from_status(503, "down"),
      TransportError::Server { status: 503 }
    );
    assert_eq!(
      TransportError::from_status(400, "bad").class(),
      FailureClass::BadRequest
    );
    assert_eq!(
      TransportError::from_status(418, "teapot").class(),
      FailureClass::Unknown
    );
  }

  #[test]
  fn test_input_errors() {
    assert!(AuthError::TermsNotAccepted.is_input_error());
    assert!(AuthError::MalformedCredentials(ValidationError::InvalidEmail).is_input_error());
    assert!(!AuthError::InvalidCredentials.is_input_error());
  }

  #[test]
  fn test_malformed_credentials_message() {
    let error = AuthError::MalformedCredentials(ValidationError::PasswordTooShort { min: 6 });
    assert_eq!(error.to_string(), "Invalid credentials");
  }
}
