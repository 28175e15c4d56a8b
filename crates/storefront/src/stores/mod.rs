//! Reducer-driven state containers.
//!
//! Each store owns one state record plus the full set of operations that
//! may change it. Operations dispatch actions through a private reducer
//! under a write lock, so every transition is a single atomic swap of
//! the state record. Consumers read cloned snapshots and never mutate
//! state directly.

pub mod auth;
pub mod product;

pub use auth::{AuthState, AuthStore};
pub use product::{ProductState, ProductStore};
