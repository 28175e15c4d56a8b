//! Integration tests for the Viorra storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p viorra-integration-tests
//!
//! # Include tests that hit the live catalog service
//! cargo test -p viorra-integration-tests -- --ignored
//! ```
//!
//! The tests under `tests/` drive the public store API against a
//! scripted [`FakeCatalog`]; nothing touches the network except the
//! explicitly ignored live tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tokio::sync::Notify;

use viorra_core::{Price, ProductId};
use viorra_storefront::catalog::{CatalogError, ProductSource, RawProduct};

// ============================================================================
// Scripted product source
// ============================================================================

struct ScriptedCatalog {
    result: Result<Vec<RawProduct>, CatalogError>,
    gate: Option<Arc<Notify>>,
}

/// Scripted [`ProductSource`] for driving stores without a network.
///
/// Replies are consumed in FIFO order, one per call. A call with no
/// scripted reply panics, which fails the test loudly.
#[derive(Default)]
pub struct FakeCatalog {
    catalogs: Mutex<VecDeque<ScriptedCatalog>>,
    products: Mutex<VecDeque<Result<RawProduct, CatalogError>>>,
    searches: Mutex<VecDeque<Result<Vec<RawProduct>, CatalogError>>>,
}

impl FakeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `fetch_catalog` reply.
    #[must_use]
    pub fn queue_catalog(self, result: Result<Vec<RawProduct>, CatalogError>) -> Self {
        self.catalogs.lock().push_back(ScriptedCatalog {
            result,
            gate: None,
        });
        self
    }

    /// Queue a `fetch_catalog` reply that is held back until `gate` is
    /// notified. Lets a test stage two overlapping fetches and control
    /// which response lands first.
    #[must_use]
    pub fn queue_catalog_gated(
        self,
        result: Result<Vec<RawProduct>, CatalogError>,
        gate: Arc<Notify>,
    ) -> Self {
        self.catalogs.lock().push_back(ScriptedCatalog {
            result,
            gate: Some(gate),
        });
        self
    }

    /// Queue a `fetch_product` reply.
    #[must_use]
    pub fn queue_product(self, result: Result<RawProduct, CatalogError>) -> Self {
        self.products.lock().push_back(result);
        self
    }

    /// Queue a `search_catalog` reply.
    #[must_use]
    pub fn queue_search(self, result: Result<Vec<RawProduct>, CatalogError>) -> Self {
        self.searches.lock().push_back(result);
        self
    }
}

impl ProductSource for FakeCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<RawProduct>, CatalogError> {
        let scripted = self
            .catalogs
            .lock()
            .pop_front()
            .expect("no scripted reply for fetch_catalog");
        if let Some(gate) = scripted.gate {
            gate.notified().await;
        }
        scripted.result
    }

    async fn fetch_product(&self, id: ProductId) -> Result<RawProduct, CatalogError> {
        self.products
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for fetch_product({id})"))
    }

    async fn search_catalog(&self, query: &str) -> Result<Vec<RawProduct>, CatalogError> {
        self.searches
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for search_catalog({query:?})"))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// A raw record the cosmetic filter always accepts: the description
/// names a skin benefit, so the title is free for the test to choose.
#[must_use]
pub fn raw_cosmetic(id: i64, title: &str) -> RawProduct {
    RawProduct {
        id: ProductId::new(id),
        title: title.to_string(),
        description: "Silky texture that flatters every skin tone".to_string(),
        price: Price::new(Decimal::new(2499, 2)),
        discount_percentage: None,
        rating: Some(4.6),
        brand: None,
        stock: 12,
    }
}

/// A raw record the cosmetic filter rejects.
#[must_use]
pub fn raw_generic(id: i64, title: &str) -> RawProduct {
    RawProduct {
        id: ProductId::new(id),
        title: title.to_string(),
        description: "A very ordinary household item".to_string(),
        price: Price::new(Decimal::new(9999, 2)),
        discount_percentage: None,
        rating: Some(4.1),
        brand: Some("Acme".to_string()),
        stock: 5,
    }
}

/// A catalog of `count` distinct cosmetics with ids starting at 1.
#[must_use]
pub fn cosmetic_catalog(count: i64) -> Vec<RawProduct> {
    (1..=count)
        .map(|id| raw_cosmetic(id, &format!("Glow Lipstick #{id}")))
        .collect()
}
