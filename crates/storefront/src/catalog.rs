//! Product catalog and query engine.
//!
//! The catalog is a static, immutable collection loaded once at startup.
//! Querying is a pure function of the collection and a [`ProductQuery`]:
//! narrowing stages run in a fixed order (category, subcategory, free text,
//! multi-criteria filters) and the survivors are sorted by a [`SortKey`].
//! Nothing here mutates the source collection, so queries may be recomputed
//! on every input change without side effects.

use std::cmp::Ordering;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shopkart_core::{ProductId, SortKey};

/// Errors that can occur while loading a catalog dataset.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The dataset file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(String),
    /// The dataset file is not valid catalog JSON.
    #[error("failed to parse catalog: {0}")]
    Parse(String),
}

/// An immutable catalog record.
///
/// `discount_percentage` is stored with the record; a consistent dataset
/// keeps it equal to `round(100 * (price - discounted_price) / price)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub subcategory: String,
    /// List price.
    pub price: Decimal,
    /// Effective price; never above `price`.
    pub discounted_price: Decimal,
    pub discount_percentage: u32,
    /// Average rating, 0-5.
    pub rating: f64,
    pub review_count: i64,
    pub in_stock: bool,
    /// Image reference, resolved by the view layer.
    pub image: String,
    pub description: String,
}

impl Product {
    /// Case-insensitive substring match across the searchable fields.
    ///
    /// `needle` must already be lowercased.
    fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self.subcategory.to_lowercase().contains(needle)
    }
}

/// Multi-criteria filters, combined with AND across the criteria present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    /// Category membership; ignored when empty.
    pub categories: Vec<String>,
    /// Inclusive `[min, max]` bounds on the discounted price.
    pub price_range: Option<(Decimal, Decimal)>,
    /// Brand membership; ignored when empty.
    pub brands: Vec<String>,
    /// Minimum rating, inclusive.
    pub min_rating: Option<f64>,
    /// Keep only products currently in stock.
    pub in_stock_only: bool,
}

/// The combined filter/search/sort input to a catalog query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// Exact subcategory match.
    pub subcategory: Option<String>,
    /// Free-text search across name, description, brand, category,
    /// subcategory (a product matches if any field contains the text).
    pub search_text: Option<String>,
    pub filters: Option<ProductFilters>,
    /// Result ordering; unset means [`SortKey::Popularity`].
    pub sort_by: Option<SortKey>,
}

/// The full static collection of products available to query.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from an in-memory collection.
    ///
    /// The given order is the catalog order, which `newest` sorting reverses.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Load a catalog from a JSON dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Parse`] if it is not a valid product array.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;

        tracing::info!(count = products.len(), path = %path.display(), "loaded catalog");
        Ok(Self::new(products))
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by exact, case-sensitive id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    /// Distinct categories, in catalog order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(product.category.as_str());
            }
        }
        seen
    }

    /// Distinct brands, in catalog order.
    #[must_use]
    pub fn brands(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.brand.as_str()) {
                seen.push(product.brand.as_str());
            }
        }
        seen
    }

    /// Products discounted by at least `min_percent`, in catalog order.
    #[must_use]
    pub fn deals(&self, min_percent: u32) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.discount_percentage >= min_percent)
            .collect()
    }

    /// Run a query against the catalog.
    ///
    /// Stages narrow the collection in a fixed order - category, subcategory,
    /// free text, filters - then the survivors are sorted. The sort is stable,
    /// so ties keep their relative catalog order. An empty result is a normal
    /// outcome, not an error.
    #[must_use]
    pub fn query(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut results: Vec<&Product> = self.products.iter().collect();

        if let Some(category) = &query.category {
            results.retain(|p| p.category == *category);
        }

        if let Some(subcategory) = &query.subcategory {
            results.retain(|p| p.subcategory == *subcategory);
        }

        if let Some(text) = &query.search_text {
            let needle = text.to_lowercase();
            results.retain(|p| p.matches_text(&needle));
        }

        if let Some(filters) = &query.filters {
            if !filters.categories.is_empty() {
                results.retain(|p| filters.categories.contains(&p.category));
            }
            if let Some((min, max)) = filters.price_range {
                results.retain(|p| p.discounted_price >= min && p.discounted_price <= max);
            }
            if !filters.brands.is_empty() {
                results.retain(|p| filters.brands.contains(&p.brand));
            }
            if let Some(min_rating) = filters.min_rating {
                results.retain(|p| p.rating >= min_rating);
            }
            if filters.in_stock_only {
                results.retain(|p| p.in_stock);
            }
        }

        match query.sort_by.unwrap_or_default() {
            SortKey::PriceLowHigh => {
                results.sort_by(|a, b| a.discounted_price.cmp(&b.discounted_price));
            }
            SortKey::PriceHighLow => {
                results.sort_by(|a, b| b.discounted_price.cmp(&a.discounted_price));
            }
            SortKey::Rating => {
                results.sort_by(|a, b| {
                    b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
                });
            }
            // No timestamps in the dataset; recency is simulated by position.
            SortKey::Newest => results.reverse(),
            SortKey::Popularity => {
                results.sort_by(|a, b| b.review_count.cmp(&a.review_count));
            }
        }

        results
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            brand: "Acme".to_owned(),
            category: "general".to_owned(),
            subcategory: "misc".to_owned(),
            price: Decimal::from(100),
            discounted_price: Decimal::from(100),
            discount_percentage: 0,
            rating: 4.0,
            review_count: 0,
            in_stock: true,
            image: format!("/images/{id}.jpg"),
            description: String::new(),
        }
    }

    /// Small two-product catalog shared across the tests below.
    fn scenario_catalog() -> Catalog {
        let mut a = product("a");
        a.category = "x".to_owned();
        a.price = Decimal::from(100);
        a.discounted_price = Decimal::from(80);
        a.discount_percentage = 20;
        a.rating = 4.5;
        a.review_count = 10;
        a.brand = "B1".to_owned();

        let mut b = product("b");
        b.category = "y".to_owned();
        b.price = Decimal::from(50);
        b.discounted_price = Decimal::from(50);
        b.rating = 3.0;
        b.review_count = 100;
        b.brand = "B2".to_owned();

        Catalog::new(vec![a, b])
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_price_low_high() {
        let catalog = scenario_catalog();
        let results = catalog.query(&ProductQuery {
            sort_by: Some(SortKey::PriceLowHigh),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["b", "a"]);
    }

    #[test]
    fn test_price_high_low() {
        let catalog = scenario_catalog();
        let results = catalog.query(&ProductQuery {
            sort_by: Some(SortKey::PriceHighLow),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["a", "b"]);
    }

    #[test]
    fn test_min_rating_filter() {
        let catalog = scenario_catalog();
        let results = catalog.query(&ProductQuery {
            filters: Some(ProductFilters {
                min_rating: Some(4.0),
                ..ProductFilters::default()
            }),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["a"]);
    }

    #[test]
    fn test_default_sort_is_popularity() {
        let catalog = scenario_catalog();
        // b has 100 reviews, a has 10.
        assert_eq!(ids(&catalog.query(&ProductQuery::default())), ["b", "a"]);
    }

    #[test]
    fn test_rating_sort_descending() {
        let catalog = scenario_catalog();
        let results = catalog.query(&ProductQuery {
            sort_by: Some(SortKey::Rating),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["a", "b"]);
    }

    #[test]
    fn test_newest_reverses_catalog_order() {
        let catalog = Catalog::new(vec![product("a"), product("b"), product("c")]);
        let results = catalog.query(&ProductQuery {
            sort_by: Some(SortKey::Newest),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["c", "b", "a"]);
    }

    #[test]
    fn test_newest_reverses_the_filtered_order() {
        let mut a = product("a");
        a.category = "x".to_owned();
        let b = product("b");
        let mut c = product("c");
        c.category = "x".to_owned();

        let catalog = Catalog::new(vec![a, b, c]);
        let results = catalog.query(&ProductQuery {
            category: Some("x".to_owned()),
            sort_by: Some(SortKey::Newest),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["c", "a"]);
    }

    #[test]
    fn test_category_and_subcategory_are_exact() {
        let mut a = product("a");
        a.category = "electronics".to_owned();
        a.subcategory = "audio".to_owned();
        let mut b = product("b");
        b.category = "electronics".to_owned();
        b.subcategory = "video".to_owned();

        let catalog = Catalog::new(vec![a, b]);
        let results = catalog.query(&ProductQuery {
            category: Some("electronics".to_owned()),
            subcategory: Some("audio".to_owned()),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["a"]);

        // Case matters for the exact stages.
        let none = catalog.query(&ProductQuery {
            category: Some("Electronics".to_owned()),
            ..ProductQuery::default()
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_search_matches_any_field() {
        let mut a = product("a");
        a.name = "Wireless Headphones".to_owned();
        let mut b = product("b");
        b.description = "A wireless charging pad".to_owned();
        let mut c = product("c");
        c.brand = "WirelessCo".to_owned();
        let d = product("d");

        let catalog = Catalog::new(vec![a, b, c, d]);
        let results = catalog.query(&ProductQuery {
            search_text: Some("WIRELESS".to_owned()),
            ..ProductQuery::default()
        });
        // Equal review counts: popularity sort is stable, order preserved.
        assert_eq!(ids(&results), ["a", "b", "c"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut a = product("a");
        a.brand = "B1".to_owned();
        a.discounted_price = Decimal::from(80);
        a.in_stock = false;
        let mut b = product("b");
        b.brand = "B1".to_owned();
        b.discounted_price = Decimal::from(80);
        let mut c = product("c");
        c.brand = "B2".to_owned();
        c.discounted_price = Decimal::from(80);

        let catalog = Catalog::new(vec![a, b, c]);
        let results = catalog.query(&ProductQuery {
            filters: Some(ProductFilters {
                brands: vec!["B1".to_owned()],
                price_range: Some((Decimal::from(50), Decimal::from(80))),
                in_stock_only: true,
                ..ProductFilters::default()
            }),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["b"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = scenario_catalog();
        let results = catalog.query(&ProductQuery {
            filters: Some(ProductFilters {
                price_range: Some((Decimal::from(50), Decimal::from(80))),
                ..ProductFilters::default()
            }),
            sort_by: Some(SortKey::PriceLowHigh),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["b", "a"]);
    }

    #[test]
    fn test_stages_narrow_in_order() {
        let mut a = product("a");
        a.category = "x".to_owned();
        a.name = "Steel bottle".to_owned();
        a.review_count = 5;
        let mut b = product("b");
        b.category = "y".to_owned();
        b.name = "Steel pan".to_owned();
        b.review_count = 50;

        let catalog = Catalog::new(vec![a, b]);
        // The search stage only sees what the category stage let through.
        let results = catalog.query(&ProductQuery {
            category: Some("x".to_owned()),
            search_text: Some("steel".to_owned()),
            ..ProductQuery::default()
        });
        assert_eq!(ids(&results), ["a"]);
    }

    #[test]
    fn test_result_is_subset_without_duplicates() {
        let catalog = scenario_catalog();
        let results = catalog.query(&ProductQuery {
            search_text: Some("product".to_owned()),
            ..ProductQuery::default()
        });

        let mut seen = Vec::new();
        for p in &results {
            assert!(catalog.get(&p.id).is_some());
            assert!(!seen.contains(&p.id));
            seen.push(p.id.clone());
        }
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut a = product("a");
        a.discounted_price = Decimal::from(10);
        let mut b = product("b");
        b.discounted_price = Decimal::from(10);
        let mut c = product("c");
        c.discounted_price = Decimal::from(5);

        let catalog = Catalog::new(vec![a, b, c]);
        let query = ProductQuery {
            sort_by: Some(SortKey::PriceLowHigh),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&catalog.query(&query)), ["c", "a", "b"]);
        // Deterministic on repeat.
        assert_eq!(ids(&catalog.query(&query)), ["c", "a", "b"]);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let catalog = scenario_catalog();
        let results = catalog.query(&ProductQuery {
            search_text: Some("no such thing".to_owned()),
            ..ProductQuery::default()
        });
        assert!(results.is_empty());
    }

    #[test]
    fn test_query_does_not_mutate_catalog() {
        let catalog = scenario_catalog();
        let before: Vec<String> = catalog.products().iter().map(|p| p.id.to_string()).collect();
        let _ = catalog.query(&ProductQuery {
            sort_by: Some(SortKey::PriceHighLow),
            ..ProductQuery::default()
        });
        let after: Vec<String> = catalog.products().iter().map(|p| p.id.to_string()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_get_is_case_sensitive() {
        let catalog = scenario_catalog();
        assert!(catalog.get(&ProductId::new("a")).is_some());
        assert!(catalog.get(&ProductId::new("A")).is_none());
    }

    #[test]
    fn test_categories_and_brands_are_distinct() {
        let catalog = scenario_catalog();
        assert_eq!(catalog.categories(), ["x", "y"]);
        assert_eq!(catalog.brands(), ["B1", "B2"]);
    }

    #[test]
    fn test_deals_by_discount_threshold() {
        let catalog = scenario_catalog();
        assert_eq!(ids(&catalog.deals(20)), ["a"]);
        assert!(catalog.deals(25).is_empty());
    }

    #[test]
    fn test_load_rejects_malformed_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{oops").unwrap();

        assert!(matches!(
            Catalog::load(&path),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            Catalog::load(&dir.path().join("missing.json")),
            Err(CatalogError::Io(_))
        ));
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let products = vec![product("a"), product("b")];
        std::fs::write(&path, serde_json::to_string(&products).unwrap()).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products(), products.as_slice());
    }
}
