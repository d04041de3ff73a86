//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use handyman_cart::config::CartConfig;
use serde::{Deserialize, Serialize};

/// Storefront configuration file (`handyman.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Cart settings.
    #[serde(default)]
    pub cart: CartConfig,
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".handyman")
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            cart: CartConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}
