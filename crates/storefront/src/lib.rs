//! Viorra Storefront domain layer.
//!
//! This crate owns the client-side state for the Viorra beauty app:
//! the product/cart store, the auth store, and the catalog pipeline
//! that turns a generic product feed into a cosmetics catalog. The
//! presentation layer reads state snapshots and dispatches the
//! operations exposed here; it never mutates state directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod stores;

pub use state::AppState;
