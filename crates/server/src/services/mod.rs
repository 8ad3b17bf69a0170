//! Application services.

pub mod auth;

pub use auth::{AuthError, AuthGateway};
