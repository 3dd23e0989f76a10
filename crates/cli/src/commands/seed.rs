//! Catalog seeding command.
//!
//! Writes a small sample dataset to the configured catalog path so the
//! `query` and `demo` commands have something to work with.

use rust_decimal::Decimal;
use thiserror::Error;

use shopkart_core::ProductId;
use shopkart_storefront::catalog::Product;

use crate::config::{Config, ConfigError};

/// Errors that can occur while writing the sample catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The dataset could not be encoded.
    #[error("Failed to encode catalog: {0}")]
    Encode(String),

    /// The dataset file could not be written.
    #[error("Failed to write catalog: {0}")]
    Io(String),
}

/// Write the sample catalog dataset.
///
/// # Errors
///
/// Returns a [`SeedError`] if configuration, encoding, or the file write
/// fails.
pub fn write_sample_catalog() -> Result<(), SeedError> {
    let config = Config::from_env()?;
    let products = sample_products();

    let payload =
        serde_json::to_string_pretty(&products).map_err(|e| SeedError::Encode(e.to_string()))?;
    std::fs::write(&config.catalog_path, payload).map_err(|e| SeedError::Io(e.to_string()))?;

    tracing::info!(
        count = products.len(),
        path = %config.catalog_path.display(),
        "sample catalog written"
    );
    Ok(())
}

#[allow(clippy::too_many_lines)]
fn sample_products() -> Vec<Product> {
    fn product(
        id: &str,
        name: &str,
        brand: &str,
        category: &str,
        subcategory: &str,
        price: u32,
        discounted_price: u32,
        discount_percentage: u32,
        rating: f64,
        review_count: i64,
        in_stock: bool,
        description: &str,
    ) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            brand: brand.to_owned(),
            category: category.to_owned(),
            subcategory: subcategory.to_owned(),
            price: Decimal::from(price),
            discounted_price: Decimal::from(discounted_price),
            discount_percentage,
            rating,
            review_count,
            in_stock,
            image: format!("/images/products/{id}.jpg"),
            description: description.to_owned(),
        }
    }

    vec![
        product(
            "aurora-buds",
            "Aurora Wireless Earbuds",
            "SoundWave",
            "electronics",
            "audio",
            2999,
            1999,
            33,
            4.3,
            1245,
            true,
            "Noise-isolating earbuds with a 30-hour charging case.",
        ),
        product(
            "pulse-watch",
            "Pulse Fitness Watch",
            "TrackFit",
            "electronics",
            "wearables",
            4999,
            3499,
            30,
            4.1,
            876,
            true,
            "Heart-rate, sleep, and step tracking with a week of battery.",
        ),
        product(
            "linen-shirt",
            "Linen Summer Shirt",
            "UrbanThread",
            "fashion",
            "men",
            1499,
            899,
            40,
            4.4,
            432,
            true,
            "Breathable full-sleeve linen shirt in natural tones.",
        ),
        product(
            "denim-jacket",
            "Classic Denim Jacket",
            "UrbanThread",
            "fashion",
            "women",
            2499,
            2499,
            0,
            4.6,
            208,
            false,
            "Stonewashed denim jacket with a relaxed fit.",
        ),
        product(
            "copper-bottle",
            "Copper Water Bottle",
            "HomeNest",
            "home",
            "kitchen",
            999,
            699,
            30,
            4.0,
            1890,
            true,
            "Hand-finished 950ml copper bottle, leak-proof cap.",
        ),
        product(
            "clay-planter",
            "Terracotta Clay Planter",
            "HomeNest",
            "home",
            "garden",
            599,
            449,
            25,
            3.8,
            95,
            true,
            "Breathable terracotta planter for indoor greens.",
        ),
        product(
            "trail-shoes",
            "Trail Running Shoes",
            "Strider",
            "sports",
            "footwear",
            5999,
            4199,
            30,
            4.5,
            2310,
            true,
            "Grippy all-terrain outsole with cushioned midsole.",
        ),
        product(
            "yoga-mat",
            "Cork Yoga Mat",
            "Strider",
            "sports",
            "fitness",
            1299,
            999,
            23,
            4.2,
            640,
            true,
            "Natural cork surface over a non-slip rubber base.",
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_discounts_are_consistent() {
        for p in sample_products() {
            let price = p.price;
            let expected = (Decimal::from(100) * (price - p.discounted_price) / price).round();
            assert_eq!(
                Decimal::from(p.discount_percentage),
                expected,
                "product {} has an inconsistent discount",
                p.id
            );
        }
    }

    #[test]
    fn test_sample_ids_are_unique() {
        let products = sample_products();
        for (i, p) in products.iter().enumerate() {
            assert!(
                products.iter().skip(i + 1).all(|q| q.id != p.id),
                "duplicate id {}",
                p.id
            );
        }
    }
}
