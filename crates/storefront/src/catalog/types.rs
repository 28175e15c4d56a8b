//! Catalog data types.
//!
//! [`RawProduct`] mirrors the wire shape of the external catalog API;
//! [`Product`] is the enriched, cosmetics-themed shape the rest of the
//! app consumes. Raw records only ever become products by going through
//! the transform pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use viorra_core::{Price, ProductId};

/// A product record as returned by the catalog API.
///
/// Only the fields the transform consumes are deserialized; everything
/// else in the payload is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    /// Percentage off the list price, `0..=100`.
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    /// Source rating on a 0-5 scale. Absent or zero means unrated.
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub stock: i64,
}

/// Envelope for list responses (`/products` and `/products/search`).
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    pub products: Vec<RawProduct>,
}

/// An enriched product ready for presentation.
///
/// Produced by the transform pipeline on every fetch; never persisted
/// and superseded wholesale by the next fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub discount_percentage: Option<Decimal>,
    /// Always at least 4.0 after enrichment.
    pub rating: f64,
    pub stock: i64,
    pub brand: String,
    pub category: String,
    pub thumbnail: String,
    /// Ordered gallery, 1 to 4 entries. The first entry is the thumbnail.
    pub images: Vec<String>,
    /// Synthesized reviews, 2 to 4 entries.
    pub reviews: Vec<Review>,
    /// Marketing bullet points, identical for every product.
    pub highlights: Vec<String>,
}

impl Product {
    /// The price after applying `discount_percentage`, rounded to cents.
    ///
    /// Products without a discount sell at list price.
    #[must_use]
    pub fn discounted_price(&self) -> Price {
        self.discount_percentage
            .map_or(self.price, |percent| self.price.apply_discount_percent(percent))
    }
}

/// A synthesized customer review. Not tied to any real user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub comment: String,
    pub reviewer: String,
}
