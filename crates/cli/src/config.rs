//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPKART_DATA_DIR` - Directory holding the durable storage slots
//!   (default: `.shopkart`)
//! - `SHOPKART_CATALOG` - Path of the catalog dataset file
//!   (default: `catalog.json`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".shopkart";
const DEFAULT_CATALOG_PATH: &str = "catalog.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the storage slots.
    pub data_dir: PathBuf,
    /// Catalog dataset file.
    pub catalog_path: PathBuf,
}

impl Config {
    /// Load configuration from the environment, filling defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a variable is set but not
    /// valid unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            data_dir: optional_path("SHOPKART_DATA_DIR", DEFAULT_DATA_DIR)?,
            catalog_path: optional_path("SHOPKART_CATALOG", DEFAULT_CATALOG_PATH)?,
        })
    }
}

fn optional_path(name: &str, default: &str) -> Result<PathBuf, ConfigError> {
    match env::var(name) {
        Ok(value) => Ok(PathBuf::from(value)),
        Err(env::VarError::NotPresent) => Ok(PathBuf::from(default)),
        Err(e) => Err(ConfigError::InvalidEnvVar(name.to_owned(), e.to_string())),
    }
}
