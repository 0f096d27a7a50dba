//! User management use cases

mod create_user;
mod get_users;

pub use create_user::{CreateUserCommand, CreateUserUseCase};
pub use get_users::GetUsersUseCase;
