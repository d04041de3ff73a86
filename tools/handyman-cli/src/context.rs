//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use handyman_cache::Cache;
use handyman_cart::persistence::KvPersistence;
use handyman_cart::CartStore;

use crate::config::StorefrontConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            StorefrontConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<StorefrontConfig> {
        let config_names = ["handyman.toml", ".handyman.toml", "handyman.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    match StorefrontConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some(config),
                        Err(e) => tracing::warn!("skipping {}: {:#}", config_path.display(), e),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory the cart is persisted in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage_dir)
    }

    /// Open the persisted cart and load its contents.
    pub async fn open_cart(&self) -> Result<CartStore> {
        let dir = self.storage_dir();
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        self.output.debug(&format!("Cart storage: {}", dir.display()));

        let cart_config = self.config.cart.clone();
        let persistence = KvPersistence::with_key(cache, cart_config.storage_key.clone());
        let mut store = CartStore::with_persistence(cart_config, persistence);
        store.hydrate().await;
        Ok(store)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
