//! HTTP client for the product catalog API.
//!
//! Uses `reqwest` with a per-request timeout. Catalog and detail
//! responses are cached with `moka` (5-minute TTL); search responses
//! are never cached.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use viorra_core::ProductId;

use crate::config::{CatalogConfig, CatalogLimits};

use super::transform::{self, EnrichOptions};
use super::types::{CatalogPage, Product, RawProduct};
use super::{CatalogError, ProductSource};

const CATALOG_CACHE_KEY: &str = "products";

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Catalog(Vec<RawProduct>),
    Product(Box<RawProduct>),
}

/// Client for the product catalog API.
///
/// Cheaply cloneable; catalog and detail responses are cached for
/// 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    limits: CatalogLimits,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                timeout: config.timeout,
                limits: config.limits,
                cache,
            }),
        }
    }

    /// Remote search with the cosmetic transform applied.
    ///
    /// Results are filtered, enriched, and capped, but never padded
    /// with synthesized products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the
    /// response cannot be parsed.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_products(
        &self,
        query: &str,
        options: &EnrichOptions,
    ) -> Result<Vec<Product>, CatalogError> {
        let raw = self.search_catalog(query).await?;
        Ok(transform::filter_and_enrich(raw, &options.without_backfill()))
    }

    /// Execute a GET request and parse the JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T, CatalogError> {
        let response = self
            .inner
            .client
            .get(url)
            .query(query)
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    CatalogError::Timeout(self.inner.timeout.as_secs())
                } else {
                    CatalogError::Http(err)
                }
            })?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status(status));
        }

        match serde_json::from_str(&response_text) {
            Ok(value) => Ok(value),
            Err(err) => {
                error!(
                    error = %err,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(err))
            }
        }
    }
}

impl ProductSource for CatalogClient {
    #[instrument(skip(self))]
    async fn fetch_catalog(&self) -> Result<Vec<RawProduct>, CatalogError> {
        // Check cache
        if let Some(CacheValue::Catalog(products)) = self.inner.cache.get(CATALOG_CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let url = format!("{}/products", self.inner.base_url);
        let page: CatalogPage = self
            .get_json(url, &[("limit", self.inner.limits.catalog_page.to_string())])
            .await?;

        self.inner
            .cache
            .insert(
                CATALOG_CACHE_KEY.to_string(),
                CacheValue::Catalog(page.products.clone()),
            )
            .await;

        Ok(page.products)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn fetch_product(&self, id: ProductId) -> Result<RawProduct, CatalogError> {
        let cache_key = format!("product:{id}");

        // Check cache
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = format!("{}/products/{id}", self.inner.base_url);
        let product: RawProduct = self.get_json(url, &[]).await.map_err(|err| match err {
            CatalogError::Status(status) if status == reqwest::StatusCode::NOT_FOUND => {
                CatalogError::NotFound(format!("Product not found: {id}"))
            }
            other => other,
        })?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    #[instrument(skip(self), fields(query = %query))]
    async fn search_catalog(&self, query: &str) -> Result<Vec<RawProduct>, CatalogError> {
        // Search responses are never cached
        let url = format!("{}/products/search", self.inner.base_url);
        let page: CatalogPage = self
            .get_json(
                url,
                &[
                    ("q", query.to_string()),
                    ("limit", self.inner.limits.search_page.to_string()),
                ],
            )
            .await?;

        Ok(page.products)
    }
}
