//! Cart configuration.

use serde::{Deserialize, Serialize};

use crate::money::Currency;
use crate::pricing::PricingPolicy;

/// Storage key the cart is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "handyman-cart";

/// Settings for a [`crate::CartStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Key the line items are stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Currency the summary is expressed in.
    #[serde(default)]
    pub currency: Currency,

    /// Tax and shipping rules.
    #[serde(default)]
    pub pricing: PricingPolicy,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            currency: Currency::default(),
            pricing: PricingPolicy::default(),
        }
    }
}

impl CartConfig {
    /// Use a different storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Use a different pricing policy.
    pub fn with_pricing(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }
}
