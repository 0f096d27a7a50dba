//! Authentication use cases
//!
//! Each use case validates its input, delegates to the configured
//! [`AuthPort`](crate::domain::auth::AuthPort) and translates port failures
//! through its [`ErrorMappingPolicy`](crate::domain::auth::ErrorMappingPolicy).

mod get_current_user;
mod login_user;
mod logout_user;
mod refresh_session;
mod register_user;

pub use get_current_user::GetCurrentUserUseCase;
pub use login_user::{LoginUserCommand, LoginUserUseCase};
pub use logout_user::LogoutUserUseCase;
pub use refresh_session::{RefreshSessionCommand, RefreshSessionUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserUseCase};

use crate::domain::auth::{AuthError, AuthenticatedUser};

/// Rejects a session the adapter should never have returned
fn ensure_valid_session(user: AuthenticatedUser) -> Result<AuthenticatedUser, AuthError> {
  if user.is_valid() {
    Ok(user)
  } else {
    tracing::error!("Adapter returned an invalid session for {}", user.email());
    Err(AuthError::InvalidSession)
  }
}
