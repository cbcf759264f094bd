//! # Cart Configuration
//!
//! Where the cart lives and under which key.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MARKETPLACE_STORAGE_KEY=@GoMarketplace:products                    │
//! │     MARKETPLACE_DB_PATH=/data/cart.db                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/marketplace-cart/cart.toml (Linux)                       │
//! │     ~/Library/Application Support/com.gomarketplace.cart/cart.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! storage_key = "@GoMarketplace:products"
//! database_path = "/var/lib/marketplace/cart.db"
//! max_connections = 2
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use marketplace_core::DEFAULT_STORAGE_KEY;
use marketplace_db::DbConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CartError, CartResult};

/// Environment variable overriding [`CartConfig::storage_key`].
pub const ENV_STORAGE_KEY: &str = "MARKETPLACE_STORAGE_KEY";

/// Environment variable overriding [`CartConfig::database_path`].
pub const ENV_DB_PATH: &str = "MARKETPLACE_DB_PATH";

const CONFIG_FILE: &str = "cart.toml";
const DATABASE_FILE: &str = "cart.db";

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_max_connections() -> u32 {
    2
}

/// Cart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Namespaced key the cart blob is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// SQLite file. `None` means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Connection pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for CartConfig {
    fn default() -> Self {
        CartConfig {
            storage_key: default_storage_key(),
            database_path: None,
            max_connections: default_max_connections(),
        }
    }
}

impl CartConfig {
    /// Sets the storage key (builder style).
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the database path (builder style).
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform config dir)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CartResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> CartResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| CartError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Cart config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CartResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(CartError::InvalidConfig(
                "storage_key must not be empty".into(),
            ));
        }

        if self.max_connections == 0 {
            return Err(CartError::InvalidConfig(
                "max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`CartConfig::load`]).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENV_STORAGE_KEY) {
            debug!(key = %key, "Overriding storage key from environment");
            self.storage_key = key;
        }

        if let Some(path) = lookup(ENV_DB_PATH) {
            debug!(path = %path, "Overriding database path from environment");
            self.database_path = Some(PathBuf::from(path));
        }
    }

    /// Resolves the SQLite file, creating the platform data directory when
    /// no explicit path is configured.
    pub fn resolve_database_path(&self) -> CartResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or_else(|| {
            CartError::InvalidConfig("Could not determine app data directory".into())
        })?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE))
    }

    /// Builds the storage configuration for `path`.
    pub fn db_config(&self, path: &Path) -> DbConfig {
        DbConfig::new(path).max_connections(self.max_connections)
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "gomarketplace", "cart")
}
