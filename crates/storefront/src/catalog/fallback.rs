//! Hand-authored products used when the live feed runs thin.
//!
//! Synthesized products carry ids at or above
//! [`ProductId::SYNTHESIZED_BASE`] so they can never collide with the
//! external catalog. They run through the same enrichment as fetched
//! records, which derives their final copy, imagery, and reviews.

use rust_decimal::Decimal;
use viorra_core::{Price, ProductId};

use super::transform::{self, ReviewMode};
use super::types::{Product, RawProduct};

/// Single image used for the fallback detail product.
const FALLBACK_IMAGE: &str = "https://images.unsplash.com/photo-1586495777744-4413f21062fa?w=400";

/// Synthesized catalog records: id, title, description, price in cents,
/// discount percent, rating, stock, brand.
const SYNTHESIZED_RECORDS: &[(i64, &str, &str, i64, i64, f64, i64, &str)] = &[
    (
        9001,
        "Essence Mascara Lash Princess",
        "Volumizing mascara that creates dramatic lashes with long-lasting wear.",
        2499,
        15,
        4.8,
        50,
        "Essence",
    ),
    (
        9002,
        "Luxury Lipstick Collection",
        "Premium lipstick with rich, creamy formula and vibrant color payoff.",
        3250,
        20,
        4.6,
        30,
        "GlowLips",
    ),
    (
        9003,
        "Hydrating Face Serum",
        "Concentrated serum with hyaluronic acid for intense hydration.",
        4500,
        10,
        4.7,
        25,
        "SkinGlow",
    ),
    (
        9004,
        "Matte Foundation SPF 30",
        "Full coverage foundation with sun protection for all-day wear.",
        3899,
        25,
        4.5,
        40,
        "FlawlessBase",
    ),
    (
        9005,
        "Rose Gold Eyeshadow Palette",
        "12-shade eyeshadow palette with matte and shimmer finishes.",
        5200,
        30,
        4.9,
        20,
        "GlowBeauty",
    ),
    (
        9006,
        "Vitamin C Brightening Cream",
        "Anti-aging moisturizer with vitamin C for radiant skin.",
        4150,
        12,
        4.4,
        35,
        "SkinGlow",
    ),
    (
        9007,
        "Waterproof Eyeliner Pen",
        "Precision eyeliner pen with long-lasting, smudge-proof formula.",
        1899,
        5,
        4.6,
        60,
        "Essence",
    ),
    (
        9008,
        "Luxury Perfume Eau de Parfum",
        "Elegant floral fragrance with notes of jasmine and vanilla.",
        8999,
        18,
        4.8,
        15,
        "LuxeScent",
    ),
    (
        9009,
        "Silky Setting Powder",
        "Translucent setting powder for a soft-focus, shine-free finish.",
        2750,
        15,
        4.7,
        45,
        "FlawlessBase",
    ),
    (
        9010,
        "Velvet Matte Lip Gloss",
        "Weightless gloss that dries down to a velvety matte finish.",
        2100,
        10,
        4.5,
        55,
        "GlowLips",
    ),
    (
        9011,
        "Radiant Glow Highlighter",
        "Finely milled highlighter for a lit-from-within glow.",
        3499,
        20,
        4.8,
        28,
        "GlowBeauty",
    ),
    (
        9012,
        "Nourishing Night Moisturizer",
        "Overnight moisturizer that replenishes the skin barrier while you sleep.",
        4850,
        15,
        4.6,
        32,
        "SkinGlow",
    ),
    (
        9013,
        "Peach Blush Duo",
        "Two complementary blush shades for a naturally flushed look.",
        2600,
        12,
        4.7,
        38,
        "GlowBeauty",
    ),
    (
        9014,
        "Lash Curling Primer",
        "Conditioning primer that lifts and curls lashes before mascara.",
        1999,
        8,
        4.4,
        65,
        "Essence",
    ),
    (
        9015,
        "Midnight Rose Fragrance Mist",
        "Airy body mist with notes of rose, amber, and soft musk.",
        5900,
        22,
        4.9,
        18,
        "LuxeScent",
    ),
];

/// The synthesized catalog used to pad a thin fetch result.
///
/// Large enough on its own to satisfy the bulk-fetch minimum of 15.
#[must_use]
pub fn synthesized_catalog() -> Vec<RawProduct> {
    SYNTHESIZED_RECORDS
        .iter()
        .map(
            |&(id, title, description, price_cents, discount_percent, rating, stock, brand)| {
                RawProduct {
                    id: ProductId::new(id),
                    title: title.to_string(),
                    description: description.to_string(),
                    price: Price::new(Decimal::new(price_cents, 2)),
                    discount_percentage: Some(Decimal::from(discount_percent)),
                    rating: Some(rating),
                    brand: Some(brand.to_string()),
                    stock,
                }
            },
        )
        .collect()
}

/// The fixed cosmetic product substituted when a detail fetch returns a
/// record that does not classify as cosmetic. Carries the requested id.
#[must_use]
pub fn fallback_detail(id: ProductId, reviews: ReviewMode) -> Product {
    Product {
        id,
        title: "Beauty Essential Product".to_string(),
        description:
            "Premium beauty product crafted with the finest ingredients for exceptional results."
                .to_string(),
        price: Price::new(Decimal::new(2999, 2)),
        discount_percentage: Some(Decimal::from(10)),
        rating: 4.5,
        stock: 25,
        brand: "GlowBeauty".to_string(),
        category: transform::COSMETIC_CATEGORY.to_string(),
        thumbnail: FALLBACK_IMAGE.to_string(),
        images: vec![FALLBACK_IMAGE.to_string()],
        reviews: transform::synthesized_reviews(id, reviews),
        highlights: transform::product_highlights(),
    }
}
