//! Best-effort cart persistence.
//!
//! The cart is stored as a JSON array of line items under a single key.
//! Loading validates each record on its own and drops the ones that do not
//! look like a line item. Saving happens on a background task so callers
//! never wait on storage.

use std::sync::Arc;

use async_trait::async_trait;
use handyman_cache::{Cache, KvBackend};
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::cart::{CartLineItem, Variants};
use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::CartError;
use crate::ids::{ProductId, Sku};

/// Where the cart is loaded from and saved to.
#[async_trait]
pub trait PersistenceAdapter: Send + Sync {
    /// Read the raw persisted records. `Ok(None)` means nothing was saved yet.
    async fn load(&self) -> Result<Option<Vec<Value>>, CartError>;

    /// Replace the persisted records with `items`.
    async fn save(&self, items: &[CartLineItem]) -> Result<(), CartError>;
}

/// [`PersistenceAdapter`] backed by a key-value [`Cache`].
#[derive(Debug, Clone)]
pub struct KvPersistence<B: KvBackend> {
    cache: Cache<B>,
    key: String,
}

impl<B: KvBackend> KvPersistence<B> {
    /// Persist under the default `"handyman-cart"` key.
    pub fn new(cache: Cache<B>) -> Self {
        Self::with_key(cache, DEFAULT_STORAGE_KEY)
    }

    /// Persist under a custom key.
    pub fn with_key(cache: Cache<B>, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
        }
    }

    /// The storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying cache.
    pub fn cache(&self) -> &Cache<B> {
        &self.cache
    }
}

#[async_trait]
impl<B: KvBackend> PersistenceAdapter for KvPersistence<B> {
    async fn load(&self) -> Result<Option<Vec<Value>>, CartError> {
        Ok(self.cache.get::<Vec<Value>>(&self.key)?)
    }

    async fn save(&self, items: &[CartLineItem]) -> Result<(), CartError> {
        self.cache.set(&self.key, items)?;
        Ok(())
    }
}

/// Turn raw persisted records into line items.
///
/// Invalid records are dropped without being reported individually. Records
/// that repeat an `(id, variants)` identity are folded into the first one.
pub fn validate_records(records: Vec<Value>) -> Vec<CartLineItem> {
    let total = records.len();
    let mut items: Vec<CartLineItem> = Vec::with_capacity(total);

    for item in records.into_iter().filter_map(validate_record) {
        match items
            .iter_mut()
            .find(|existing| existing.matches(&item.id, item.variants.as_ref()))
        {
            Some(existing) => {
                let merged = existing.quantity.saturating_add(item.quantity);
                existing.quantity = merged.min(existing.stock).max(existing.quantity);
            }
            None => items.push(item),
        }
    }

    if items.len() < total {
        tracing::debug!(kept = items.len(), total, "dropped invalid persisted cart records");
    }
    items
}

/// Accept a record with a non-empty id and name, a numeric price and a
/// positive whole quantity.
fn validate_record(record: Value) -> Option<CartLineItem> {
    let Value::Object(fields) = record else {
        return None;
    };

    let id = non_empty_str(&fields, "id")?;
    let name = non_empty_str(&fields, "name")?;
    let price = whole_number(fields.get("price")?)?;
    let quantity = positive_quantity(fields.get("quantity")?)?;

    let stock = fields
        .get("stock")
        .and_then(Value::as_u64)
        .map_or(quantity, |stock| u32::try_from(stock).unwrap_or(u32::MAX))
        .max(quantity);

    let variants = match fields.get("variants") {
        None | Some(Value::Null) => None,
        Some(value) => Some(serde_json::from_value::<Variants>(value.clone()).ok()?),
    };

    Some(CartLineItem {
        id: ProductId::new(id),
        name: name.to_string(),
        price,
        image: text(&fields, "image"),
        image_alt: text(&fields, "imageAlt"),
        category: text(&fields, "category"),
        sku: Sku::new(text(&fields, "sku")),
        quantity,
        stock,
        variants,
        original_price: fields.get("originalPrice").and_then(whole_number),
    })
}

fn non_empty_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

fn text(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn whole_number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|float| float.round() as i64))
}

fn positive_quantity(value: &Value) -> Option<u32> {
    let quantity = match value.as_u64() {
        Some(quantity) => quantity,
        None => {
            let float = value.as_f64()?;
            if float.fract() != 0.0 || float <= 0.0 {
                return None;
            }
            float as u64
        }
    };
    u32::try_from(quantity).ok().filter(|quantity| *quantity > 0)
}

/// Background writer that applies saves in submission order.
#[derive(Debug)]
pub struct WriteBack {
    tx: mpsc::UnboundedSender<Vec<CartLineItem>>,
    handle: JoinHandle<()>,
}

impl WriteBack {
    /// Spawn the writer on the current Tokio runtime.
    pub fn spawn(adapter: Arc<dyn PersistenceAdapter>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<CartLineItem>>();

        let handle = tokio::spawn(async move {
            while let Some(mut items) = rx.recv().await {
                // Only the newest queued snapshot needs writing.
                while let Ok(newer) = rx.try_recv() {
                    items = newer;
                }

                if let Err(error) = adapter.save(&items).await {
                    tracing::error!(%error, items = items.len(), "failed to save cart");
                }
            }
        });

        Self { tx, handle }
    }

    /// Queue a snapshot without waiting for it to be written.
    pub fn submit(&self, items: Vec<CartLineItem>) {
        if self.tx.send(items).is_err() {
            tracing::warn!("cart writer has stopped; snapshot dropped");
        }
    }

    /// Stop accepting snapshots and wait for the queue to drain.
    pub async fn shutdown(self) -> Result<(), CartError> {
        drop(self.tx);
        self.handle
            .await
            .map_err(|e| CartError::Worker(e.to_string()))
    }
}
