pub mod auth;
pub mod config;
pub mod persistence;
pub mod security;
pub mod user;
