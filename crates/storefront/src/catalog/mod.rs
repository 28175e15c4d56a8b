//! Product catalog pipeline.
//!
//! # Architecture
//!
//! - The external feed is a generic REST catalog; [`CatalogClient`]
//!   talks to it with `reqwest` and caches responses in-memory via
//!   `moka` (5 minute TTL, searches excluded)
//! - [`transform`] turns raw records into the cosmetics catalog:
//!   keyword filtering, canned copy and brands, keyed imagery,
//!   synthesized reviews, and a 20-product cap with mock backfill
//! - [`ProductSource`] is the seam between the stores and the wire;
//!   tests substitute an in-memory source
//!
//! # Example
//!
//! ```rust,ignore
//! use viorra_storefront::catalog::{transform, CatalogClient, EnrichOptions, ProductSource};
//! use viorra_storefront::config::CatalogConfig;
//!
//! let client = CatalogClient::new(&CatalogConfig::from_env()?);
//! let raw = client.fetch_catalog().await?;
//! let catalog = transform::filter_and_enrich(raw, &EnrichOptions::default());
//! ```

mod client;
pub mod fallback;
pub mod transform;
pub mod types;

pub use client::CatalogClient;
pub use transform::{EnrichOptions, ReviewMode};
pub use types::{CatalogPage, Product, RawProduct, Review};

use std::future::Future;

use thiserror::Error;
use viorra_core::ProductId;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the configured deadline.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The API answered with a non-success status.
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Abstraction over the remote product catalog.
///
/// Mirrors the three endpoints of the catalog API and returns raw,
/// untransformed records; callers run them through [`transform`].
/// Implemented by [`CatalogClient`] for the live service and by
/// in-memory fakes in tests.
pub trait ProductSource: Send + Sync {
    /// Fetch the first page of the raw catalog (at most 100 records).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the
    /// response cannot be parsed.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<RawProduct>, CatalogError>> + Send;

    /// Fetch a single raw product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is unknown, or a
    /// transport/parse error otherwise.
    fn fetch_product(
        &self,
        id: ProductId,
    ) -> impl Future<Output = Result<RawProduct, CatalogError>> + Send;

    /// Full-text search against the remote catalog (at most 50 records).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the
    /// response cannot be parsed.
    fn search_catalog(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<RawProduct>, CatalogError>> + Send;
}
