//! Application state shared across screens.

use std::sync::Arc;

use crate::catalog::{CatalogClient, EnrichOptions};
use crate::config::{CatalogConfig, ConfigError};
use crate::services::AuthService;
use crate::stores::{AuthStore, ProductStore};

/// Application state shared across all screens.
///
/// This struct is cheaply cloneable via `Arc` and hands out the two
/// stores plus the configuration they were built from. It is passed
/// explicitly to whatever consumes it; there is no ambient singleton,
/// so tests can build as many independent instances as they need.
pub struct AppState<S = CatalogClient> {
    inner: Arc<AppStateInner<S>>,
}

struct AppStateInner<S> {
    config: CatalogConfig,
    products: ProductStore<S>,
    auth: AuthStore,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl AppState {
    /// Create application state from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment override fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(CatalogConfig::from_env()?))
    }

    /// Create application state over the live catalog service.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        let client = CatalogClient::new(&config);
        let products = ProductStore::new(client, EnrichOptions::default());
        let auth = AuthStore::new(AuthService::new());

        Self::from_stores(config, products, auth)
    }
}

impl<S> AppState<S> {
    /// Assemble application state from prebuilt stores.
    ///
    /// This is the seam tests use to swap in a scripted product source
    /// or a zero-latency auth service.
    #[must_use]
    pub fn from_stores(config: CatalogConfig, products: ProductStore<S>, auth: AuthStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                auth,
            }),
        }
    }

    /// Get a reference to the catalog configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn products(&self) -> &ProductStore<S> {
        &self.inner.products
    }

    /// Get a reference to the auth store.
    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.inner.auth
    }
}
