//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Simulated authentication backend (login, registration)

pub mod auth;

pub use auth::{AuthError, AuthService, Registration};
