//! The cart facade.
//!
//! [`CartStore`] owns the cart state. Every change goes through
//! [`CartStore::dispatch`], which runs the reducer, notifies subscribers and
//! queues a snapshot for persistence once the initial load has finished.

use std::fmt;
use std::sync::Arc;

use crate::cart::{reduce, CartCommand, CartState, LineItemDraft, Variants};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::persistence::{validate_records, PersistenceAdapter, WriteBack};
use crate::pricing::CartSummary;

/// Callback invoked with the new state after every dispatch.
pub type Listener = Box<dyn Fn(&CartState) + Send + Sync>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Persistence {
    adapter: Arc<dyn PersistenceAdapter>,
    writer: WriteBack,
}

/// Single owner of a shopping cart.
///
/// Mutating operations take `&mut self`; readers borrow snapshots through
/// [`CartStore::state`] or subscribe to changes.
pub struct CartStore {
    state: CartState,
    config: CartConfig,
    persistence: Option<Persistence>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    hydrated: bool,
}

impl CartStore {
    /// In-memory cart with nothing to load. Starts empty and ready.
    pub fn detached(config: CartConfig) -> Self {
        Self {
            state: reduce(CartState::new(), CartCommand::LoadCart(Vec::new())),
            config,
            persistence: None,
            listeners: Vec::new(),
            next_subscription: 0,
            hydrated: true,
        }
    }

    /// Cart backed by `adapter`. Starts empty and loading; call
    /// [`CartStore::hydrate`] to read persisted items.
    ///
    /// Must be called from within a Tokio runtime, since it spawns the
    /// write-back task.
    pub fn with_persistence(config: CartConfig, adapter: impl PersistenceAdapter + 'static) -> Self {
        let adapter: Arc<dyn PersistenceAdapter> = Arc::new(adapter);
        let writer = WriteBack::spawn(adapter.clone());

        Self {
            state: CartState::new(),
            config,
            persistence: Some(Persistence { adapter, writer }),
            listeners: Vec::new(),
            next_subscription: 0,
            hydrated: false,
        }
    }

    /// Load persisted items once. Later calls do nothing.
    ///
    /// Storage failures and malformed data leave the cart empty; they are
    /// logged, never returned.
    pub async fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        self.hydrated = true;

        let Some(adapter) = self.persistence.as_ref().map(|p| p.adapter.clone()) else {
            self.dispatch(CartCommand::SetLoading(false));
            return;
        };

        self.dispatch(CartCommand::SetLoading(true));

        match adapter.load().await {
            Ok(Some(records)) => {
                let items = validate_records(records);
                tracing::debug!(items = items.len(), "cart restored from storage");
                self.dispatch(CartCommand::LoadCart(items));
            }
            Ok(None) => {
                tracing::debug!("no saved cart");
                self.dispatch(CartCommand::SetLoading(false));
            }
            Err(error) => {
                tracing::error!(%error, "failed to load cart; starting empty");
                self.dispatch(CartCommand::SetLoading(false));
            }
        }
    }

    /// Apply a command.
    pub fn dispatch(&mut self, command: CartCommand) {
        let name = command.name();
        let persist = command.mutates_items();

        self.state = reduce(std::mem::take(&mut self.state), command);
        tracing::debug!(
            command = name,
            total_items = self.state.total_items(),
            total_price = self.state.total_price(),
            "cart updated"
        );

        for (_, listener) in &self.listeners {
            listener(&self.state);
        }

        if persist && !self.state.is_loading() {
            if let Some(persistence) = &self.persistence {
                persistence.writer.submit(self.state.items().to_vec());
            }
        }
    }

    /// Add units of a product+variant, merging with an existing line.
    ///
    /// Only a malformed draft is an error; stock limits cap the quantity
    /// silently.
    pub fn add_item(&mut self, draft: LineItemDraft) -> Result<(), CartError> {
        let command = CartCommand::add_item(draft)?;
        self.dispatch(command);
        Ok(())
    }

    /// Remove every line of a product, whatever its variants.
    pub fn remove_item(&mut self, id: impl Into<ProductId>) {
        self.dispatch(CartCommand::remove_item(id));
    }

    /// Set the quantity of every line of a product. Zero or less removes it.
    pub fn update_quantity(&mut self, id: impl Into<ProductId>, quantity: i64) {
        self.dispatch(CartCommand::update_quantity(id, quantity));
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.dispatch(CartCommand::ClearCart);
    }

    /// Units held for a product+variant, 0 if absent.
    pub fn get_item_quantity(&self, id: impl Into<ProductId>, variants: Option<&Variants>) -> u32 {
        self.state
            .find(&id.into(), variants)
            .map_or(0, |item| item.quantity)
    }

    /// Whether a product+variant is in the cart.
    pub fn is_item_in_cart(&self, id: impl Into<ProductId>, variants: Option<&Variants>) -> bool {
        self.get_item_quantity(id, variants) > 0
    }

    /// Nominal weight of the cart contents.
    pub fn total_weight_grams(&self) -> u64 {
        self.config.pricing.total_weight_grams(&self.state)
    }

    /// Subtotal, tax, shipping and total.
    pub fn get_cart_summary(&self) -> CartSummary {
        self.config
            .pricing
            .summary_for(&self.state, self.config.currency)
    }

    /// Current state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Settings in use.
    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Register a listener called after every dispatch.
    pub fn subscribe(&mut self, listener: impl Fn(&CartState) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() < before
    }

    /// Wait for queued writes to finish and release the store.
    pub async fn close(self) -> Result<(), CartError> {
        match self.persistence {
            Some(persistence) => persistence.writer.shutdown().await,
            None => Ok(()),
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("persistent", &self.persistence.is_some())
            .field("listeners", &self.listeners.len())
            .field("hydrated", &self.hydrated)
            .finish()
    }
}
