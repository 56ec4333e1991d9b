//! # Application Configuration
//!
//! Runtime settings for the kiosk binary, read from the environment
//! (and `.env` when present).

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use vend_core::{CatalogConfig, Language};

/// Locations tried for the catalog when `KIOSK_CATALOG` is unset
const CATALOG_PATHS: [&str; 3] = [
    "config/catalog.toml",
    "../config/catalog.toml",
    "../../config/catalog.toml",
];

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl LogFormat {
    fn from_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Plain
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Explicit catalog file
    pub catalog_path: Option<PathBuf>,
    /// Override for products without their own starting stock
    pub default_stock: Option<u32>,
    /// Raw language tag that skips the language prompt
    pub language: Option<String>,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            catalog_path: std::env::var("KIOSK_CATALOG").ok().map(PathBuf::from),
            default_stock: std::env::var("KIOSK_DEFAULT_STOCK")
                .ok()
                .and_then(|s| s.trim().parse().ok()),
            language: std::env::var("KIOSK_LANGUAGE").ok(),
            log_format: std::env::var("KIOSK_LOG_FORMAT")
                .map(|v| LogFormat::from_value(&v))
                .unwrap_or_default(),
        }
    }

    /// Preselected language, if configured and supported
    pub fn preselected_language(&self) -> Option<Language> {
        let tag = self.language.as_deref()?;
        match tag.parse() {
            Ok(language) => Some(language),
            Err(e) => {
                warn!("Ignoring KIOSK_LANGUAGE: {}", e);
                None
            }
        }
    }

    /// Load the catalog configuration.
    ///
    /// An explicit `KIOSK_CATALOG` must exist and parse. Otherwise the usual
    /// locations are searched, falling back to the built-in line-up.
    pub fn load_catalog(&self) -> anyhow::Result<CatalogConfig> {
        let config = match &self.catalog_path {
            Some(path) => read_catalog(path)?,
            None => search_catalog()?,
        };

        Ok(match self.default_stock {
            Some(stock) => config.with_default_stock(stock),
            None => config,
        })
    }
}

fn read_catalog(path: &Path) -> anyhow::Result<CatalogConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let config = CatalogConfig::from_toml(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    info!("Loaded {} products from {}", config.products.len(), path.display());
    Ok(config)
}

fn search_catalog() -> anyhow::Result<CatalogConfig> {
    for path in CATALOG_PATHS {
        let path = Path::new(path);
        if path.is_file() {
            return read_catalog(path);
        }
    }

    info!("No catalog file found, using built-in catalog");
    Ok(CatalogConfig::default())
}
