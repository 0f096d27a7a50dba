pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::AuthenticatedUser;
pub use errors::{AuthError, FailureClass, StoreError, TransportError, ValidationError};
pub use ports::{AuthPort, SessionStore, TokenGenerator};
pub use services::ErrorMappingPolicy;
pub use value_objects::{Credentials, Email, RegistrationRequest};
