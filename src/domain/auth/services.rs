use super::errors::{AuthError, FailureClass};

/// Translates port failures into domain failures.
///
/// Each use case owns one table. Domain-shaped errors pass through untouched,
/// transport failures are looked up by [`FailureClass`], and anything the
/// table does not recognize becomes the use case's generic failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMappingPolicy {
  Login,
  Register,
  Refresh,
}

impl ErrorMappingPolicy {
  /// Maps a single port failure; every input produces exactly one output
  pub fn map(self, error: AuthError) -> AuthError {
    let mapped = match error {
      AuthError::Transport(ref transport) => self.lookup(transport.class()),
      AuthError::Store(ref store) => {
        tracing::error!("Session store failed during {:?}: {}", self, store);
        self.fallback()
      }
      other => return other,
    };

    tracing::warn!("Mapped {:?} failure '{}' to '{}'", self, error, mapped);
    mapped
  }

  fn lookup(self, class: FailureClass) -> AuthError {
    match (self, class) {
      (Self::Login, FailureClass::Unauthorized) => AuthError::InvalidCredentials,
      (Self::Login, FailureClass::Forbidden) => AuthError::AccessDenied,
      (Self::Register, FailureClass::Conflict) => AuthError::EmailAlreadyRegistered,
      (Self::Register, FailureClass::BadRequest) => AuthError::InvalidRegistrationData,
      (Self::Refresh, FailureClass::Unauthorized) => AuthError::NoActiveSession,
      (_, FailureClass::ServerFault) => AuthError::ServerUnavailable,
      _ => self.fallback(),
    }
  }

  /// Generic failure reported when nothing more specific applies
  pub fn fallback(self) -> AuthError {
    match self {
      Self::Login => AuthError::LoginFailed,
      Self::Register => AuthError::RegistrationFailed,
      Self::Refresh => AuthError::RefreshFailed,
    }
  }
}
