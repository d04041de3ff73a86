//! Type-safe Key-Value storage layer for the Handyman storefront.
//!
//! Stands in for browser local storage: values are kept as JSON under string
//! keys, either in memory or as one file per key on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use handyman_cache::Cache;
//!
//! let cache = Cache::open_dir(".handyman")?;
//!
//! // Store a value
//! cache.set("handyman-cart", &items)?;
//!
//! // Retrieve a value
//! let items: Option<Vec<CartLineItem>> = cache.get("handyman-cart")?;
//!
//! // Delete a value
//! cache.delete("handyman-cart")?;
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileStore, KvBackend, MemoryStore};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvBackend, MemoryStore};
}
