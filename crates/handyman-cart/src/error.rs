//! Cart error types.

use thiserror::Error;

/// Errors that can occur in cart operations.
///
/// None of these reach the shopper: storage failures are logged and the cart
/// carries on with its in-memory state.
#[derive(Error, Debug)]
pub enum CartError {
    /// A line-item draft failed validation before dispatch.
    #[error("Invalid cart item: {0}")]
    InvalidItem(String),

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] handyman_cache::CacheError),

    /// The write-back worker stopped before draining.
    #[error("Persistence worker failed: {0}")]
    Worker(String),
}
