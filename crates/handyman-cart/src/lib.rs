//! Cart core for the Handyman storefront.
//!
//! This crate provides the pieces behind the storefront's shopping cart:
//!
//! - **Cart**: line items, cart state and the reducer that drives it
//! - **Store**: the [`CartStore`] facade with subscriptions and persistence
//! - **Pricing**: tax, weight-based shipping and the cart summary
//! - **Money**: currencies and locale-aware price formatting
//! - **Catalog**: the sample products and conversion into cart drafts
//!
//! # Example
//!
//! ```rust,ignore
//! use handyman_cart::prelude::*;
//!
//! let cache = Cache::open_dir(".handyman")?;
//! let mut store = CartStore::with_persistence(CartConfig::default(), KvPersistence::new(cache));
//! store.hydrate().await;
//!
//! store.add_item(LineItemDraft::new("1", "Gorra Artesanal", 45000, 3).with_quantity(2))?;
//! let summary = store.get_cart_summary();
//! println!("Total: {}", summary.total);
//!
//! store.close().await?;
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod config;
pub mod format;
pub mod persistence;
pub mod pricing;
pub mod store;

pub use error::CartError;
pub use ids::*;
pub use money::{Currency, Money};
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{CartCommand, CartLineItem, CartState, LineItemDraft, Variants};

    // Store
    pub use crate::config::CartConfig;
    pub use crate::persistence::{KvPersistence, PersistenceAdapter};
    pub use crate::store::{CartStore, SubscriptionId};

    // Pricing
    pub use crate::pricing::{CartSummary, PricingPolicy};

    // Catalog
    pub use crate::catalog::{sample_catalog, Product};

    pub use handyman_cache::Cache;
}
