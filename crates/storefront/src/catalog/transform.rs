//! Cosmetic catalog transform.
//!
//! The external catalog is a generic product feed. This module filters
//! it down to cosmetics-adjacent records and enriches each one with
//! marketing copy, a curated brand, product photography, synthesized
//! reviews, and highlight bullets. Everything here is pure: the same
//! input and options always produce the same catalog.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use viorra_core::ProductId;

use super::fallback;
use super::types::{Product, RawProduct, Review};

/// Category assigned to every enriched product.
pub const COSMETIC_CATEGORY: &str = "Beauty & Cosmetics";

/// Keywords that mark a raw record as cosmetics-adjacent.
const COSMETIC_KEYWORDS: &[&str] = &[
    "essence",
    "mascara",
    "lipstick",
    "foundation",
    "concealer",
    "powder",
    "blush",
    "eyeshadow",
    "serum",
    "moisturizer",
    "cream",
    "oil",
    "lotion",
    "perfume",
    "fragrance",
    "nail",
    "beauty",
    "skin",
    "face",
    "lip",
    "eye",
    "makeup",
    "cosmetic",
    "gloss",
    "primer",
    "bronzer",
    "highlighter",
];

/// Canned marketing copy. Scanned in order against the lower-cased
/// title; the first matching keyword's copy replaces the description.
const DESCRIPTION_COPY: &[(&str, &str)] = &[
    (
        "essence",
        "A lightweight, hydrating essence that prepares your skin for the next steps in your beauty routine.",
    ),
    (
        "mascara",
        "Long-lasting mascara that volumizes and lengthens your lashes for a dramatic eye look.",
    ),
    (
        "lipstick",
        "Creamy, pigmented lipstick that provides full coverage and long-wearing color.",
    ),
    (
        "foundation",
        "Lightweight foundation that provides buildable coverage for a natural, flawless finish.",
    ),
    (
        "concealer",
        "Full-coverage concealer that hides imperfections and brightens the under-eye area.",
    ),
    (
        "powder",
        "Setting powder that locks in your makeup and controls shine all day long.",
    ),
    (
        "serum",
        "Concentrated serum packed with active ingredients for targeted skin concerns.",
    ),
    (
        "moisturizer",
        "Hydrating moisturizer that nourishes and protects your skin barrier.",
    ),
    (
        "perfume",
        "Luxurious fragrance with long-lasting scent and elegant packaging.",
    ),
    (
        "cream",
        "Rich, nourishing cream that provides intense hydration for dry skin.",
    ),
];

/// House brand rules. Scanned in order against the lower-cased title;
/// the first matching rule overrides the source brand.
const BRAND_RULES: &[(&[&str], &str)] = &[
    (&["essence", "mascara"], "Essence"),
    (&["lipstick", "lip"], "GlowLips"),
    (&["foundation", "concealer"], "FlawlessBase"),
    (&["serum", "moisturizer"], "SkinGlow"),
    (&["perfume", "fragrance"], "LuxeScent"),
];

/// Brand used when no rule matches and the source record has none.
const DEFAULT_BRAND: &str = "Beauty Brand";

/// Product photography pool. Selection is keyed off the product id so
/// a product keeps its image across fetches.
const IMAGE_POOL: &[&str] = &[
    "https://images.unsplash.com/photo-1596462502278-27bfdc403348?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1522335789203-aabd1fc54bc9?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1583241800698-9c2e8b2b3b8e?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1586495777744-4413f21062fa?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1560472354-b33ff0c44a43?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1512496015851-a90fb38ba796?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1487412947147-5cebf100ffc2?w=400&h=400&fit=crop",
];

/// Number of pool images appended after the keyed image.
const GALLERY_EXTRAS: usize = 3;

/// Review templates. Enrichment takes a 2 to 4 entry prefix.
const REVIEW_TEMPLATES: &[(u8, &str, &str)] = &[
    (
        5,
        "Absolutely love this product! Amazing quality and long-lasting.",
        "Sarah M.",
    ),
    (
        4,
        "Great value for money. Would definitely recommend!",
        "Jessica L.",
    ),
    (
        5,
        "Perfect shade and texture. Exactly what I was looking for.",
        "Emma K.",
    ),
    (4, "Good product, fast shipping. Will order again.", "Lisa R."),
];

const MIN_REVIEWS: usize = 2;
const MAX_REVIEWS: usize = 4;

/// Marketing bullets attached to every product.
const HIGHLIGHTS: &[&str] = &[
    "Cruelty-free and vegan formula",
    "Long-lasting wear up to 12 hours",
    "Suitable for all skin types",
    "Dermatologically tested",
    "Free shipping on orders over $50",
];

/// Floor applied to every enriched rating.
const RATING_FLOOR: f64 = 4.0;
/// Rating assumed when the source record has none.
const DEFAULT_RATING: f64 = 4.2;

// =============================================================================
// Options
// =============================================================================

/// How many synthesized reviews a product receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewMode {
    /// Derive the count from the product id. Stable across runs.
    #[default]
    DerivedFromId,
    /// Draw the count from an RNG seeded with this value mixed with the
    /// product id. Reproducible for a given seed.
    Seeded(u64),
    /// Use the same count for every product, clamped to the template range.
    Fixed(usize),
}

impl ReviewMode {
    fn review_count(self, id: ProductId) -> usize {
        match self {
            Self::DerivedFromId => {
                MIN_REVIEWS + usize::try_from(id.as_i64().rem_euclid(3)).unwrap_or(0)
            }
            Self::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(id.as_i64().unsigned_abs()));
                rng.random_range(MIN_REVIEWS..=MAX_REVIEWS)
            }
            Self::Fixed(count) => count.clamp(MIN_REVIEWS, MAX_REVIEWS),
        }
    }
}

/// Tuning for the transform pipeline.
#[derive(Debug, Clone, Copy)]
pub struct EnrichOptions {
    /// Review-count policy.
    pub review_mode: ReviewMode,
    /// Pad the catalog with synthesized products when fewer than this
    /// many survive filtering. Zero disables padding.
    pub min_catalog: usize,
    /// Hard cap on the catalog size.
    pub max_catalog: usize,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self {
            review_mode: ReviewMode::default(),
            min_catalog: 15,
            max_catalog: 20,
        }
    }
}

impl EnrichOptions {
    /// The same options with catalog padding disabled. Search results
    /// are never padded.
    #[must_use]
    pub const fn without_backfill(self) -> Self {
        Self {
            review_mode: self.review_mode,
            min_catalog: 0,
            max_catalog: self.max_catalog,
        }
    }
}

// =============================================================================
// Transform
// =============================================================================

/// Whether a raw record looks like a cosmetics product.
///
/// True iff any keyword from the fixed set occurs, case-insensitively,
/// in the title or description.
#[must_use]
pub fn is_cosmetic(title: &str, description: &str) -> bool {
    let title = title.to_lowercase();
    let description = description.to_lowercase();
    COSMETIC_KEYWORDS
        .iter()
        .any(|keyword| title.contains(keyword) || description.contains(keyword))
}

/// Enrich a raw record into a cosmetics-themed [`Product`].
///
/// Copy, brand, and imagery are derived deterministically from the
/// title and id, so repeated fetches produce identical catalogs.
#[must_use]
pub fn enrich(raw: RawProduct, reviews: ReviewMode) -> Product {
    let title_lower = raw.title.to_lowercase();

    let description = DESCRIPTION_COPY
        .iter()
        .find(|(keyword, _)| title_lower.contains(keyword))
        .map_or(raw.description, |(_, copy)| (*copy).to_string());

    let brand = BRAND_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| title_lower.contains(k)))
        .map(|(_, brand)| (*brand).to_string())
        .or_else(|| raw.brand.filter(|b| !b.is_empty()))
        .unwrap_or_else(|| DEFAULT_BRAND.to_string());

    let rating = raw
        .rating
        .filter(|r| r.abs() > f64::EPSILON)
        .unwrap_or(DEFAULT_RATING)
        .max(RATING_FLOOR);

    let thumbnail = pool_image(raw.id);
    let mut images = Vec::with_capacity(1 + GALLERY_EXTRAS);
    images.push(thumbnail.clone());
    images.extend(
        IMAGE_POOL
            .iter()
            .take(GALLERY_EXTRAS)
            .map(|url| (*url).to_string()),
    );

    Product {
        id: raw.id,
        title: raw.title,
        description,
        price: raw.price,
        discount_percentage: raw.discount_percentage,
        rating,
        stock: raw.stock,
        brand,
        category: COSMETIC_CATEGORY.to_string(),
        thumbnail,
        images,
        reviews: synthesized_reviews(raw.id, reviews),
        highlights: product_highlights(),
    }
}

/// Filter a raw feed down to cosmetics, enrich each survivor, and cap
/// the result at `options.max_catalog`, preserving feed order.
///
/// When fewer than `options.min_catalog` products survive, the catalog
/// is padded with the synthesized products from [`fallback`], skipping
/// ids already present, and re-capped.
#[must_use]
pub fn filter_and_enrich(raw: Vec<RawProduct>, options: &EnrichOptions) -> Vec<Product> {
    let mut products: Vec<Product> = raw
        .into_iter()
        .filter(|record| is_cosmetic(&record.title, &record.description))
        .map(|record| enrich(record, options.review_mode))
        .take(options.max_catalog)
        .collect();

    if products.len() < options.min_catalog {
        for record in fallback::synthesized_catalog() {
            if products.iter().all(|p| p.id != record.id) {
                products.push(enrich(record, options.review_mode));
            }
        }
        products.truncate(options.max_catalog);
    }

    products
}

/// Deterministic image selection keyed off the product id.
fn pool_image(id: ProductId) -> String {
    let index = usize::try_from(id.as_i64().unsigned_abs()).unwrap_or(0) % IMAGE_POOL.len();
    IMAGE_POOL.get(index).copied().unwrap_or_default().to_string()
}

/// Build the synthesized review list for a product.
pub(crate) fn synthesized_reviews(id: ProductId, mode: ReviewMode) -> Vec<Review> {
    REVIEW_TEMPLATES
        .iter()
        .take(mode.review_count(id))
        .map(|(rating, comment, reviewer)| Review {
            rating: *rating,
            comment: (*comment).to_string(),
            reviewer: (*reviewer).to_string(),
        })
        .collect()
}

/// The highlight bullets shared by every product.
pub(crate) fn product_highlights() -> Vec<String> {
    HIGHLIGHTS.iter().map(|h| (*h).to_string()).collect()
}
