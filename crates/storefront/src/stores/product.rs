//! Product and cart state.
//!
//! One store owns the catalog list, the detail view, local search, and
//! the cart, mirroring how the screens consume them: the home screen
//! reads `filtered_products`, the detail screen reads `current_product`,
//! and the cart drawer reads `cart`.
//!
//! Fetch operations are guarded by a per-family generation counter.
//! When two overlapping fetches race, only the most recently started one
//! may write its outcome; the older response is discarded instead of
//! clobbering newer state.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, instrument, warn};

use viorra_core::{Price, ProductId};

use crate::catalog::transform;
use crate::catalog::{CatalogClient, EnrichOptions, Product, ProductSource, fallback};
use crate::models::Cart;

/// Error shown when the catalog fetch fails for any reason.
const FETCH_PRODUCTS_ERROR: &str = "Failed to fetch products. Please check your connection.";

/// Error shown when a single product fetch fails for any reason.
const FETCH_PRODUCT_ERROR: &str = "Failed to fetch product details. Please try again.";

// =============================================================================
// State
// =============================================================================

/// Product store state snapshot.
///
/// `filtered_products` is always a subset of `products`; with an empty
/// `search_query` the two lists are equal.
#[derive(Debug, Clone, Default)]
pub struct ProductState {
    /// The full enriched catalog from the last successful fetch.
    pub products: Vec<Product>,
    /// `products` narrowed by `search_query`.
    pub filtered_products: Vec<Product>,
    /// The product shown on the detail screen, if one was fetched.
    pub current_product: Option<Product>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Message from the most recent failed fetch, cleared on the next start.
    pub error: Option<String>,
    /// The query as typed, not lowercased.
    pub search_query: String,
    pub cart: Cart,
}

/// State transitions. Every operation funnels through exactly one of these.
#[derive(Debug)]
enum ProductAction {
    FetchProductsStart,
    FetchProductsSuccess(Vec<Product>),
    FetchProductsFailure(String),
    FetchProductStart,
    FetchProductSuccess(Box<Product>),
    FetchProductFailure(String),
    Search(String),
    AddToCart(Box<Product>),
    RemoveFromCart(ProductId),
    ClearCart,
}

impl ProductState {
    fn apply(&mut self, action: ProductAction) {
        match action {
            ProductAction::FetchProductsStart | ProductAction::FetchProductStart => {
                self.loading = true;
                self.error = None;
            }
            ProductAction::FetchProductsSuccess(products) => {
                // The fresh list replaces both views; the stored query is
                // kept but not re-applied until the next search.
                self.filtered_products = products.clone();
                self.products = products;
                self.loading = false;
                self.error = None;
            }
            ProductAction::FetchProductSuccess(product) => {
                self.current_product = Some(*product);
                self.loading = false;
                self.error = None;
            }
            ProductAction::FetchProductsFailure(message)
            | ProductAction::FetchProductFailure(message) => {
                // Previously fetched products and detail stay visible.
                self.loading = false;
                self.error = Some(message);
            }
            ProductAction::Search(query) => {
                let needle = query.to_lowercase();
                self.filtered_products = self
                    .products
                    .iter()
                    .filter(|product| {
                        product.title.to_lowercase().contains(&needle)
                            || product.description.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect();
                self.search_query = query;
            }
            ProductAction::AddToCart(product) => self.cart.add(*product),
            ProductAction::RemoveFromCart(id) => self.cart.remove(id),
            ProductAction::ClearCart => self.cart.clear(),
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Product store handle.
///
/// Cheap to clone; all clones share one state record.
pub struct ProductStore<S = CatalogClient> {
    inner: Arc<ProductStoreInner<S>>,
}

struct ProductStoreInner<S> {
    source: S,
    options: EnrichOptions,
    state: RwLock<ProductState>,
    catalog_generation: AtomicU64,
    detail_generation: AtomicU64,
}

impl<S> Clone for ProductStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ProductSource> ProductStore<S> {
    /// Create a store over a product source.
    #[must_use]
    pub fn new(source: S, options: EnrichOptions) -> Self {
        Self {
            inner: Arc::new(ProductStoreInner {
                source,
                options,
                state: RwLock::new(ProductState::default()),
                catalog_generation: AtomicU64::new(0),
                detail_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ProductState {
        self.inner.state.read().clone()
    }

    /// Fetch the catalog, filter it down to cosmetics, and enrich it.
    ///
    /// Never returns an error: failures land in the state's `error` field
    /// as a user-facing message and leave the previous catalog in place.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) {
        let generation = self.inner.catalog_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(ProductAction::FetchProductsStart);

        let action = match self.inner.source.fetch_catalog().await {
            Ok(raw) => ProductAction::FetchProductsSuccess(transform::filter_and_enrich(
                raw,
                &self.inner.options,
            )),
            Err(error) => {
                warn!(error = %error, "Catalog fetch failed");
                ProductAction::FetchProductsFailure(FETCH_PRODUCTS_ERROR.to_string())
            }
        };

        self.finish(&self.inner.catalog_generation, generation, action);
    }

    /// Fetch one product for the detail screen.
    ///
    /// A product that turns out not to be a cosmetic is replaced by a
    /// canned beauty product carrying the requested id, so the detail
    /// screen never renders off-theme inventory. Fetch failures land in
    /// `error` and keep the previous detail product.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn fetch_product_by_id(&self, id: ProductId) {
        let generation = self.inner.detail_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.dispatch(ProductAction::FetchProductStart);

        let review_mode = self.inner.options.review_mode;
        let action = match self.inner.source.fetch_product(id).await {
            Ok(raw) => {
                let product = if transform::is_cosmetic(&raw.title, &raw.description) {
                    transform::enrich(raw, review_mode)
                } else {
                    fallback::fallback_detail(id, review_mode)
                };
                ProductAction::FetchProductSuccess(Box::new(product))
            }
            Err(error) => {
                warn!(error = %error, "Product fetch failed");
                ProductAction::FetchProductFailure(FETCH_PRODUCT_ERROR.to_string())
            }
        };

        self.finish(&self.inner.detail_generation, generation, action);
    }

    /// Narrow the catalog list by a case-insensitive substring match on
    /// title or description. An empty query restores the full list.
    ///
    /// Purely local; the network is never touched.
    pub fn search_products(&self, query: &str) {
        self.dispatch(ProductAction::Search(query.to_string()));
    }

    /// Add one unit of a product to the cart.
    pub fn add_to_cart(&self, product: Product) {
        self.dispatch(ProductAction::AddToCart(Box::new(product)));
    }

    /// Remove a product's cart line entirely. No-op for unknown ids.
    pub fn remove_from_cart(&self, id: ProductId) {
        self.dispatch(ProductAction::RemoveFromCart(id));
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.dispatch(ProductAction::ClearCart);
    }

    /// Sum of list price times quantity over the cart.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.inner.state.read().cart.total()
    }

    /// Total units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        self.inner.state.read().cart.item_count()
    }

    fn dispatch(&self, action: ProductAction) {
        self.inner.state.write().apply(action);
    }

    /// Apply a fetch outcome unless a newer fetch of the same family has
    /// started since. The check runs under the write lock so a stale
    /// response can never slip in between a newer start and its finish.
    fn finish(&self, guard: &AtomicU64, generation: u64, action: ProductAction) {
        let mut state = self.inner.state.write();
        if guard.load(Ordering::SeqCst) == generation {
            state.apply(action);
        } else {
            debug!("Discarding stale fetch response");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use crate::catalog::RawProduct;
    use crate::catalog::transform::ReviewMode;

    use super::*;

    fn product(id: i64, title: &str, description: &str) -> Product {
        transform::enrich(
            RawProduct {
                id: ProductId::new(id),
                title: title.to_string(),
                description: description.to_string(),
                price: Price::new(Decimal::new(1999, 2)),
                discount_percentage: None,
                rating: None,
                brand: None,
                stock: 10,
            },
            ReviewMode::DerivedFromId,
        )
    }

    fn loaded_state() -> ProductState {
        let mut state = ProductState::default();
        state.apply(ProductAction::FetchProductsSuccess(vec![
            product(1, "Velvet Lipstick", "A creamy matte finish"),
            product(2, "Hydrating Serum", "Overnight skin repair"),
            product(3, "Lash Mascara", "Dramatic volume"),
        ]));
        state
    }

    #[test]
    fn test_fetch_start_sets_loading_and_clears_error() {
        let mut state = ProductState::default();
        state.apply(ProductAction::FetchProductsFailure("boom".into()));
        state.apply(ProductAction::FetchProductsStart);

        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_fetch_success_replaces_both_lists() {
        let state = loaded_state();

        assert_eq!(state.products.len(), 3);
        assert_eq!(state.filtered_products.len(), 3);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_fetch_failure_keeps_previous_catalog() {
        let mut state = loaded_state();
        state.apply(ProductAction::FetchProductsStart);
        state.apply(ProductAction::FetchProductsFailure(
            FETCH_PRODUCTS_ERROR.to_string(),
        ));

        assert_eq!(state.products.len(), 3);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some(FETCH_PRODUCTS_ERROR));
    }

    #[test]
    fn test_detail_failure_keeps_current_product() {
        let mut state = loaded_state();
        state.apply(ProductAction::FetchProductSuccess(Box::new(product(
            7,
            "Rose Blush",
            "A soft petal flush",
        ))));
        state.apply(ProductAction::FetchProductFailure("nope".into()));

        let current = state.current_product.unwrap();
        assert_eq!(current.id, ProductId::new(7));
        assert_eq!(state.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_search_matches_title_and_description() {
        let mut state = loaded_state();

        state.apply(ProductAction::Search("LIPSTICK".into()));
        assert_eq!(state.filtered_products.len(), 1);
        assert_eq!(state.search_query, "LIPSTICK");

        state.apply(ProductAction::Search("skin".into()));
        assert_eq!(state.filtered_products.len(), 1);
        assert_eq!(state.filtered_products.first().unwrap().id, ProductId::new(2));
    }

    #[test]
    fn test_empty_search_restores_full_list() {
        let mut state = loaded_state();
        state.apply(ProductAction::Search("serum".into()));
        state.apply(ProductAction::Search(String::new()));

        assert_eq!(state.filtered_products.len(), state.products.len());
        assert_eq!(state.search_query, "");
    }

    #[test]
    fn test_fetch_success_resets_filter_but_keeps_query() {
        let mut state = loaded_state();
        state.apply(ProductAction::Search("serum".into()));
        state.apply(ProductAction::FetchProductsSuccess(vec![
            product(4, "Satin Foundation", "Buildable coverage"),
            product(5, "Glow Primer", "Dewy base"),
        ]));

        assert_eq!(state.filtered_products.len(), 2);
        assert_eq!(state.search_query, "serum");
    }

    #[test]
    fn test_cart_actions() {
        let mut state = loaded_state();
        let lipstick = state.products.first().unwrap().clone();
        let serum = state.products.get(1).unwrap().clone();

        state.apply(ProductAction::AddToCart(Box::new(lipstick.clone())));
        state.apply(ProductAction::AddToCart(Box::new(lipstick)));
        state.apply(ProductAction::AddToCart(Box::new(serum)));
        assert_eq!(state.cart.item_count(), 3);
        assert_eq!(state.cart.len(), 2);

        state.apply(ProductAction::RemoveFromCart(ProductId::new(2)));
        assert_eq!(state.cart.len(), 1);

        state.apply(ProductAction::ClearCart);
        assert!(state.cart.is_empty());
    }
}
