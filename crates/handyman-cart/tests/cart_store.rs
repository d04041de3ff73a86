//! End-to-end tests for the cart store with real persistence backends.
//!
//! Each test hydrates a store, mutates it, closes it to flush pending writes
//! and then checks what ended up in storage.

use handyman_cache::{Cache, CacheError, KvBackend, MemoryStore};
use handyman_cart::persistence::validate_records;
use handyman_cart::prelude::*;
use serde_json::{json, Value};

const KEY: &str = "handyman-cart";

fn stored_items(store: &MemoryStore) -> Vec<CartLineItem> {
    let records: Vec<Value> = Cache::new(store.clone()).get(KEY).unwrap().unwrap_or_default();
    validate_records(records)
}

fn persistent_store(backend: MemoryStore) -> CartStore {
    CartStore::with_persistence(CartConfig::default(), KvPersistence::new(Cache::new(backend)))
}

struct BrokenBackend;

impl KvBackend for BrokenBackend {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Err(CacheError::StoreError("disk unavailable".to_string()))
    }

    fn set(&self, _key: &str, _value: &[u8]) -> Result<(), CacheError> {
        Err(CacheError::StoreError("disk unavailable".to_string()))
    }

    fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::StoreError("disk unavailable".to_string()))
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn first_visit_starts_empty_and_ready() {
    let backend = MemoryStore::new();
    let mut store = persistent_store(backend.clone());
    assert!(store.state().is_loading());

    store.hydrate().await;
    assert!(!store.state().is_loading());
    assert!(store.state().is_empty());

    store.close().await.unwrap();
    assert!(!backend.exists(KEY).unwrap());
}

#[tokio::test]
async fn mutations_are_saved_and_restored() {
    let backend = MemoryStore::new();
    let mut store = persistent_store(backend.clone());
    store.hydrate().await;

    let red = Variants::default().with_color("rojo");
    store
        .add_item(LineItemDraft::new("A", "Gorra", 1000, 5).with_quantity(2))
        .unwrap();
    store
        .add_item(LineItemDraft::new("A", "Gorra", 1000, 5).with_variants(red.clone()))
        .unwrap();
    store
        .add_item(LineItemDraft::new("B", "Poncho", 5000, 3).with_quantity(10))
        .unwrap();
    store.update_quantity("B", 2);
    let expected = store.state().items().to_vec();
    store.close().await.unwrap();

    assert_eq!(stored_items(&backend), expected);

    let mut restored = persistent_store(backend);
    restored.hydrate().await;
    assert_eq!(restored.state().items(), expected.as_slice());
    assert_eq!(restored.state().total_items(), 5);
    assert_eq!(restored.state().total_price(), 13000);
    assert_eq!(restored.get_item_quantity("A", Some(&red)), 1);
    restored.close().await.unwrap();
}

#[tokio::test]
async fn clear_cart_persists_empty_list() {
    let backend = MemoryStore::new();
    let mut store = persistent_store(backend.clone());
    store.hydrate().await;
    store
        .add_item(LineItemDraft::new("A", "Gorra", 1000, 5))
        .unwrap();
    store.clear_cart();
    store.close().await.unwrap();

    assert!(backend.exists(KEY).unwrap());
    assert!(stored_items(&backend).is_empty());
}

#[tokio::test]
async fn invalid_records_are_dropped_on_load() {
    let backend = MemoryStore::new();
    Cache::new(backend.clone())
        .set(
            KEY,
            &json!([
                {"id": "1", "name": "Gorra", "price": 45000, "quantity": 2, "stock": 3},
                {"id": "", "name": "Sin id", "price": 1000, "quantity": 1},
                {"id": "2", "name": "Muñeco", "price": "35000", "quantity": 1},
                {"id": "3", "name": "Pintura", "price": 120000, "quantity": 0},
            ]),
        )
        .unwrap();

    let mut store = persistent_store(backend);
    store.hydrate().await;

    assert_eq!(store.state().items().len(), 1);
    assert_eq!(store.state().total_price(), 90000);
    store.close().await.unwrap();
}

#[tokio::test]
async fn malformed_storage_starts_empty() {
    let backend = MemoryStore::new();
    backend.set(KEY, b"not json at all").unwrap();

    let mut store = persistent_store(backend.clone());
    store.hydrate().await;
    assert!(!store.state().is_loading());
    assert!(store.state().is_empty());

    store
        .add_item(LineItemDraft::new("A", "Gorra", 1000, 5))
        .unwrap();
    store.close().await.unwrap();
    assert_eq!(stored_items(&backend).len(), 1);
}

#[tokio::test]
async fn broken_backend_never_surfaces() {
    let adapter = KvPersistence::new(Cache::new(BrokenBackend));
    let mut store = CartStore::with_persistence(CartConfig::default(), adapter);
    store.hydrate().await;
    assert!(!store.state().is_loading());

    store
        .add_item(LineItemDraft::new("A", "Gorra", 1000, 5))
        .unwrap();
    assert_eq!(store.state().total_items(), 1);
    assert!(store.close().await.is_ok());
}

#[tokio::test]
async fn changes_before_hydrate_are_replaced_by_saved_cart() {
    let backend = MemoryStore::new();
    Cache::new(backend.clone())
        .set(KEY, &json!([{"id": "1", "name": "Gorra", "price": 45000, "quantity": 1}]))
        .unwrap();

    let mut store = persistent_store(backend.clone());
    store
        .add_item(LineItemDraft::new("Z", "Temprano", 10, 5))
        .unwrap();
    store.hydrate().await;

    assert!(!store.is_item_in_cart("Z", None));
    assert!(store.is_item_in_cart("1", None));
    store.close().await.unwrap();

    let saved = stored_items(&backend);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id.as_str(), "1");
}

#[tokio::test]
async fn hydrate_runs_once() {
    let backend = MemoryStore::new();
    let mut store = persistent_store(backend.clone());
    store.hydrate().await;
    store
        .add_item(LineItemDraft::new("A", "Gorra", 1000, 5))
        .unwrap();

    Cache::new(backend.clone()).set(KEY, &json!([])).unwrap();
    store.hydrate().await;

    assert_eq!(store.get_item_quantity("A", None), 1);
    store.close().await.unwrap();
}

#[tokio::test]
async fn custom_storage_key() {
    let backend = MemoryStore::new();
    let config = CartConfig::default().with_storage_key("tienda-cart");
    let adapter = KvPersistence::with_key(Cache::new(backend.clone()), config.storage_key.clone());
    let mut store = CartStore::with_persistence(config, adapter);
    store.hydrate().await;
    store
        .add_item(LineItemDraft::new("A", "Gorra", 1000, 5))
        .unwrap();
    store.close().await.unwrap();

    assert!(backend.exists("tienda-cart").unwrap());
    assert!(!backend.exists(KEY).unwrap());
}

#[tokio::test]
async fn file_backed_cart_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut store = CartStore::with_persistence(
        CartConfig::default(),
        KvPersistence::new(Cache::open_dir(dir.path()).unwrap()),
    );
    store.hydrate().await;
    let catalog = sample_catalog();
    let gorra = handyman_cart::catalog::find_product(&catalog, "1").unwrap();
    store
        .add_item(gorra.to_draft(Variants::default().with_size("M"), 2).unwrap())
        .unwrap();
    store.close().await.unwrap();

    let mut restored = CartStore::with_persistence(
        CartConfig::default(),
        KvPersistence::new(Cache::open_dir(dir.path()).unwrap()),
    );
    restored.hydrate().await;
    let summary = restored.get_cart_summary();
    assert_eq!(summary.subtotal.amount, 90000);
    assert_eq!(summary.tax.amount, 17100);
    assert_eq!(summary.shipping.amount, 8000);
    assert_eq!(summary.total.amount, 115100);
    restored.close().await.unwrap();
}

#[tokio::test]
async fn subscribers_observe_hydration() {
    use std::sync::{Arc, Mutex};

    let backend = MemoryStore::new();
    Cache::new(backend.clone())
        .set(KEY, &json!([{"id": "1", "name": "Gorra", "price": 45000, "quantity": 2}]))
        .unwrap();

    let mut store = persistent_store(backend);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    store.subscribe(move |state| {
        log.lock().unwrap().push((state.is_loading(), state.total_items()));
    });
    store.hydrate().await;

    assert_eq!(*seen.lock().unwrap(), vec![(true, 0), (false, 2)]);
    store.close().await.unwrap();
}
