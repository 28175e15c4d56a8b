//! Live tests against the public catalog service.
//!
//! These tests require network access to `dummyjson.com`, or whatever
//! host `VIORRA_CATALOG_URL` points at.
//!
//! Run with: cargo test -p viorra-integration-tests -- --ignored

use viorra_core::ProductId;
use viorra_storefront::catalog::{CatalogClient, EnrichOptions, ProductSource};
use viorra_storefront::config::CatalogConfig;
use viorra_storefront::stores::ProductStore;

fn live_client() -> CatalogClient {
    CatalogClient::new(&CatalogConfig::default())
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_live_catalog_is_filtered_and_enriched() {
    let store = ProductStore::new(live_client(), EnrichOptions::default());
    store.fetch_products().await;

    let state = store.state();
    assert_eq!(state.error, None);
    assert!(state.products.len() >= 15, "catalog came back too thin");
    assert!(state.products.len() <= 20, "catalog cap not applied");
    for product in &state.products {
        assert_eq!(product.category, "Beauty & Cosmetics");
        assert!(product.rating >= 4.0);
        assert!(!product.images.is_empty());
        assert!(!product.reviews.is_empty());
    }
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_live_product_detail_stays_on_theme() {
    let store = ProductStore::new(live_client(), EnrichOptions::default());

    // Whatever the service returns for this id, the detail screen gets
    // a cosmetic: either the enriched product or the canned stand-in.
    store.fetch_product_by_id(ProductId::new(1)).await;

    let state = store.state();
    assert_eq!(state.error, None);
    let current = state.current_product.expect("detail missing");
    assert_eq!(current.id, ProductId::new(1));
    assert_eq!(current.category, "Beauty & Cosmetics");
    assert!(current.rating >= 4.0);
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_live_search_returns_only_cosmetics() {
    let results = live_client()
        .search_products("lipstick", &EnrichOptions::default())
        .await
        .expect("search failed");

    // The result set may be empty, but nothing off-theme slips through
    // and search results are never padded past the cap.
    assert!(results.len() <= 20);
    for product in &results {
        assert_eq!(product.category, "Beauty & Cosmetics");
        assert!(product.rating >= 4.0);
    }
}

#[tokio::test]
#[ignore = "Requires network access to dummyjson.com"]
async fn test_live_raw_fetch_respects_page_limit() {
    let raw = live_client().fetch_catalog().await.expect("fetch failed");
    assert!(!raw.is_empty());
    assert!(raw.len() <= 100);
}
