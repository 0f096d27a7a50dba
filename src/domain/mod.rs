pub mod auth;
pub mod user;

// Re-export auth module for easier access
pub use auth::*;
