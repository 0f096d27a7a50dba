pub mod entities;
pub mod errors;
pub mod ports;

// Re-export commonly used types
pub use entities::{NewUser, User, UserUpdate};
pub use errors::UserError;
pub use ports::UserPort;
