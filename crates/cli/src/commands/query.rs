//! Catalog query command.

use rust_decimal::Decimal;
use thiserror::Error;

use shopkart_core::SortKey;
use shopkart_storefront::catalog::{Catalog, CatalogError, ProductFilters, ProductQuery};

use crate::config::{Config, ConfigError};

/// Errors that can occur while running a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog dataset could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The sort key is not recognized.
    #[error("{0}")]
    InvalidSort(String),
}

/// Parsed command-line query inputs.
#[derive(Debug, Clone, Default)]
pub struct QueryArgs {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub search: Option<String>,
    pub brands: Vec<String>,
    pub min_rating: Option<f64>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub in_stock: bool,
    pub sort: Option<String>,
}

/// Load the catalog and report the products matching `args`.
///
/// # Errors
///
/// Returns a [`QueryError`] if configuration or the catalog cannot be
/// loaded, or the sort key is invalid.
pub fn run(args: &QueryArgs) -> Result<(), QueryError> {
    let config = Config::from_env()?;
    let catalog = Catalog::load(&config.catalog_path)?;

    let query = build_query(args)?;
    let results = catalog.query(&query);

    tracing::info!(
        matched = results.len(),
        total = catalog.len(),
        "catalog query"
    );
    for product in results {
        tracing::info!(
            "{} | {} ({}) | {}/{} | {} at {} [{} reviews]{}",
            product.id,
            product.name,
            product.brand,
            product.category,
            product.subcategory,
            product.rating,
            product.discounted_price,
            product.review_count,
            if product.in_stock { "" } else { " - out of stock" },
        );
    }
    Ok(())
}

fn build_query(args: &QueryArgs) -> Result<ProductQuery, QueryError> {
    let sort_by = args
        .sort
        .as_deref()
        .map(str::parse::<SortKey>)
        .transpose()
        .map_err(QueryError::InvalidSort)?;

    let price_range = match (args.min_price, args.max_price) {
        (None, None) => None,
        (min, max) => Some((
            Decimal::from(min.unwrap_or(0)),
            Decimal::from(max.unwrap_or(u32::MAX)),
        )),
    };

    let filters = ProductFilters {
        categories: Vec::new(),
        price_range,
        brands: args.brands.clone(),
        min_rating: args.min_rating,
        in_stock_only: args.in_stock,
    };

    Ok(ProductQuery {
        category: args.category.clone(),
        subcategory: args.subcategory.clone(),
        search_text: args.search.clone(),
        filters: (filters != ProductFilters::default()).then_some(filters),
        sort_by,
    })
}
