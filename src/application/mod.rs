//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Use cases depend only on domain ports, so
//! any adapter can be plugged in behind them.

pub mod auth;
pub mod user;
