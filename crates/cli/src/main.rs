//! ShopKart CLI - Catalog seeding and engine demos.
//!
//! # Usage
//!
//! ```bash
//! # Write a sample catalog dataset
//! shopkart seed
//!
//! # Query the catalog
//! shopkart query --search headphones --sort price_low_high
//! shopkart query --category electronics --min-rating 4 --in-stock
//!
//! # Run the scripted register/cart/checkout flow
//! shopkart demo
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPKART_DATA_DIR` - Directory holding the durable storage slots
//!   (default: `.shopkart`)
//! - `SHOPKART_CATALOG` - Path of the catalog dataset file
//!   (default: `catalog.json`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "shopkart")]
#[command(author, version, about = "ShopKart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a sample catalog dataset file
    Seed,
    /// Query the catalog
    Query {
        /// Exact category to browse
        #[arg(long)]
        category: Option<String>,

        /// Exact subcategory to browse
        #[arg(long)]
        subcategory: Option<String>,

        /// Free-text search across name, description, brand, and categories
        #[arg(long)]
        search: Option<String>,

        /// Keep only these brands (repeatable)
        #[arg(long)]
        brand: Vec<String>,

        /// Minimum rating, inclusive
        #[arg(long)]
        min_rating: Option<f64>,

        /// Lower price bound, inclusive
        #[arg(long)]
        min_price: Option<u32>,

        /// Upper price bound, inclusive
        #[arg(long)]
        max_price: Option<u32>,

        /// Keep only products in stock
        #[arg(long)]
        in_stock: bool,

        /// Sort key (`price_low_high`, `price_high_low`, `rating`,
        /// `newest`, `popularity`)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Run a scripted register/cart/checkout flow against the data directory
    Demo,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::write_sample_catalog()?,
        Commands::Query {
            category,
            subcategory,
            search,
            brand,
            min_rating,
            min_price,
            max_price,
            in_stock,
            sort,
        } => commands::query::run(&commands::query::QueryArgs {
            category,
            subcategory,
            search,
            brands: brand,
            min_rating,
            min_price,
            max_price,
            in_stock,
            sort,
        })?,
        Commands::Demo => commands::demo::run()?,
    }
    Ok(())
}
