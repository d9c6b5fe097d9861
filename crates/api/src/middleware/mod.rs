//! API middleware.

pub mod auth;

pub use auth::{AuthSession, auth_middleware};
