//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     TIENDA_STORAGE_BACKEND=sqlite                                       │
//! │     TIENDA_DATA_DIR=/var/lib/tienda                                     │
//! │     TIENDA_STORAGE_KEY=cart                                             │
//! │     TIENDA_LOCALE=es-CO                                                 │
//! │     TIENDA_SHIPPING_COST=15000                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     --config <path>, or tienda.toml in the platform config dir          │
//! │     ~/.config/tienda/tienda.toml (Linux)                                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! backend = "file"        # memory | file | sqlite
//! data_dir = "./data"
//! key = "cart"
//!
//! [display]
//! locale = "es-CO"        # es-CO | es-ES | en-US | none
//! currency_symbol = "$"
//!
//! [checkout]
//! shipping_cost = 15000
//!
//! [catalog]
//! path = "./products.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tienda_core::{Catalog, GroupingPolicy, Money, CART_STORAGE_KEY, DEFAULT_SHIPPING_COST};
use tienda_store::StorageBackend;
use tracing::{debug, info, warn};

const CONFIG_FILE_NAME: &str = "tienda.toml";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid catalog file: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,

    /// Where file and SQLite backends keep their data.
    /// Default: the platform data dir.
    pub data_dir: Option<PathBuf>,

    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            backend: StorageBackend::default(),
            data_dir: None,
            key: CART_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub locale: String,
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            locale: "es-CO".to_string(),
            currency_symbol: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    /// Flat shipping cost in whole currency units.
    pub shipping_cost: i64,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            shipping_cost: DEFAULT_SHIPPING_COST.units(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// JSON catalog (`{"products": [...]}`). Built-in products when unset.
    pub path: Option<PathBuf>,
}

// =============================================================================
// AppConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub display: DisplaySettings,
    pub checkout: CheckoutSettings,
    pub catalog: CatalogSettings,
}

impl AppConfig {
    /// Loads defaults, then the config file, then environment overrides.
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() || explicit => {
                info!(?path, "Loading config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.key must not be empty".into()));
        }

        if self.checkout.shipping_cost < 0 {
            return Err(ConfigError::Invalid(format!(
                "checkout.shipping_cost must be >= 0, got {}",
                self.checkout.shipping_cost
            )));
        }

        self.grouping_policy()?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies `TIENDA_*` overrides read through `var`.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(backend) = var("TIENDA_STORAGE_BACKEND") {
            match backend.parse() {
                Ok(parsed) => {
                    debug!(%backend, "Overriding storage backend from environment");
                    self.storage.backend = parsed;
                }
                Err(e) => warn!(%backend, error = %e, "Ignoring TIENDA_STORAGE_BACKEND"),
            }
        }

        if let Some(dir) = var("TIENDA_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = var("TIENDA_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(locale) = var("TIENDA_LOCALE") {
            self.display.locale = locale;
        }

        if let Some(cost) = var("TIENDA_SHIPPING_COST") {
            match cost.trim().parse::<i64>() {
                Ok(units) => self.checkout.shipping_cost = units,
                Err(_) => warn!(%cost, "Ignoring TIENDA_SHIPPING_COST"),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "tienda", "tienda")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    pub fn grouping_policy(&self) -> ConfigResult<GroupingPolicy> {
        self.display
            .locale
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("display.locale: {}", e)))
    }

    pub fn shipping_cost(&self) -> Money {
        Money::from_units(self.checkout.shipping_cost)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("tienda-data"))
    }

    pub fn load_catalog(&self) -> ConfigResult<Catalog> {
        match &self.catalog.path {
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Catalog::from_json(&contents)?)
            }
            None => Ok(Catalog::default()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
