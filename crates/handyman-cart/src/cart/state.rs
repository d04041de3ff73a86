//! Cart state and its derived totals.

use serde::Serialize;

use crate::cart::item::{CartLineItem, Variants};
use crate::ids::ProductId;

/// The authoritative in-memory cart.
///
/// `total_items` and `total_price` are derived from `items` and only ever
/// written by [`CartState::with_items`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLineItem>,
    total_items: u32,
    total_price: i64,
    is_loading: bool,
}

impl CartState {
    /// An empty cart that has not loaded persisted data yet.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_price: 0,
            is_loading: true,
        }
    }

    /// Replace the items and recompute both totals.
    pub(crate) fn with_items(mut self, items: Vec<CartLineItem>) -> Self {
        let (total_items, total_price) = calculate_totals(&items);
        self.items = items;
        self.total_items = total_items;
        self.total_price = total_price;
        self
    }

    pub(crate) fn with_loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Sum of `price * quantity` in the smallest currency unit.
    pub fn total_price(&self) -> i64 {
        self.total_price
    }

    /// Whether the startup load is still pending.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for an `(id, variants)` identity.
    pub fn find(&self, id: &ProductId, variants: Option<&Variants>) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.matches(id, variants))
    }

    pub(crate) fn position(&self, id: &ProductId, variants: Option<&Variants>) -> Option<usize> {
        self.items.iter().position(|item| item.matches(id, variants))
    }

    /// Move the items out, leaving the totals stale until `with_items`.
    pub(crate) fn take_items(&mut self) -> Vec<CartLineItem> {
        std::mem::take(&mut self.items)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold the items into `(Σ quantity, Σ price * quantity)`.
pub fn calculate_totals(items: &[CartLineItem]) -> (u32, i64) {
    items.iter().fold((0u32, 0i64), |(count, price), item| {
        (
            count.saturating_add(item.quantity),
            price.saturating_add(item.line_total()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::item::LineItemDraft;

    #[test]
    fn test_new_state_is_empty_and_loading() {
        let state = CartState::new();
        assert!(state.is_empty());
        assert!(state.is_loading());
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.total_price(), 0);
    }

    #[test]
    fn test_with_items_recomputes_totals() {
        let items = vec![
            LineItemDraft::new("1", "Gorra", 45000, 3).into_line_item(2),
            LineItemDraft::new("2", "Muñeco", 35000, 8).into_line_item(1),
        ];
        let state = CartState::new().with_items(items);

        assert_eq!(state.total_items(), 3);
        assert_eq!(state.total_price(), 125000);
    }

    #[test]
    fn test_find_by_identity() {
        let red = Variants::default().with_color("rojo");
        let state = CartState::new().with_items(vec![
            LineItemDraft::new("1", "Gorra", 45000, 3).into_line_item(1),
            LineItemDraft::new("1", "Gorra", 45000, 3)
                .with_variants(red.clone())
                .into_line_item(2),
        ]);

        let id = ProductId::new("1");
        assert_eq!(state.find(&id, None).map(|i| i.quantity), Some(1));
        assert_eq!(state.find(&id, Some(&red)).map(|i| i.quantity), Some(2));
        assert!(state.find(&ProductId::new("9"), None).is_none());
    }
}
