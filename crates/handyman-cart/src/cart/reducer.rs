//! The cart state machine.
//!
//! [`reduce`] is a pure transition function: it takes the current state and a
//! command and returns the next state. It performs no I/O and never fails.

use crate::cart::item::{CartLineItem, LineItemDraft};
use crate::cart::state::CartState;
use crate::error::CartError;
use crate::ids::ProductId;

/// Everything that can change a cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Merge into the `(id, variants)` line or append a new one.
    AddItem(LineItemDraft),
    /// Drop every line with this product id, whatever its variants.
    RemoveItem(ProductId),
    /// Set the quantity of every line with this product id.
    UpdateQuantity { id: ProductId, quantity: i64 },
    /// Empty the cart.
    ClearCart,
    /// Replace the items with validated persisted data and finish loading.
    LoadCart(Vec<CartLineItem>),
    /// Toggle the loading flag.
    SetLoading(bool),
}

impl CartCommand {
    /// Build an `AddItem` command, rejecting malformed drafts.
    pub fn add_item(draft: LineItemDraft) -> Result<Self, CartError> {
        draft.validate()?;
        Ok(CartCommand::AddItem(draft))
    }

    /// Build a `RemoveItem` command.
    pub fn remove_item(id: impl Into<ProductId>) -> Self {
        CartCommand::RemoveItem(id.into())
    }

    /// Build an `UpdateQuantity` command.
    pub fn update_quantity(id: impl Into<ProductId>, quantity: i64) -> Self {
        CartCommand::UpdateQuantity {
            id: id.into(),
            quantity,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::AddItem(_) => "add_item",
            CartCommand::RemoveItem(_) => "remove_item",
            CartCommand::UpdateQuantity { .. } => "update_quantity",
            CartCommand::ClearCart => "clear_cart",
            CartCommand::LoadCart(_) => "load_cart",
            CartCommand::SetLoading(_) => "set_loading",
        }
    }

    /// Whether the command changes the line items.
    pub fn mutates_items(&self) -> bool {
        !matches!(self, CartCommand::SetLoading(_))
    }
}

/// Apply `command` to `state`.
///
/// Quantities are capped at each line's stock snapshot; a request above the
/// snapshot is applied as exactly the snapshot. Lines never hold zero units.
pub fn reduce(mut state: CartState, command: CartCommand) -> CartState {
    match command {
        CartCommand::AddItem(draft) => {
            let requested = draft.requested_quantity();
            let position = state.position(&draft.id, draft.variants.as_ref());
            let mut items = state.take_items();

            match position.and_then(|index| items.get_mut(index)) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(requested).min(existing.stock);
                }
                None => {
                    let quantity = requested.min(draft.stock);
                    items.push(draft.into_line_item(quantity));
                }
            }

            items.retain(|item| item.quantity > 0);
            state.with_items(items)
        }

        CartCommand::RemoveItem(id) => {
            let mut items = state.take_items();
            items.retain(|item| item.id != id);
            state.with_items(items)
        }

        CartCommand::UpdateQuantity { id, quantity } => {
            if quantity <= 0 {
                return reduce(state, CartCommand::RemoveItem(id));
            }

            let requested = u32::try_from(quantity).unwrap_or(u32::MAX);
            let mut items = state.take_items();
            for item in items.iter_mut().filter(|item| item.id == id) {
                item.quantity = requested.min(item.stock);
            }

            items.retain(|item| item.quantity > 0);
            state.with_items(items)
        }

        CartCommand::ClearCart => state.with_items(Vec::new()),

        CartCommand::LoadCart(items) => state.with_items(items).with_loading(false),

        CartCommand::SetLoading(is_loading) => state.with_loading(is_loading),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::item::Variants;

    fn draft(id: &str, price: i64, stock: u32) -> LineItemDraft {
        LineItemDraft::new(id, format!("Producto {}", id), price, stock)
    }

    fn apply(state: CartState, commands: Vec<CartCommand>) -> CartState {
        commands.into_iter().fold(state, |state, command| {
            let next = reduce(state, command);
            assert_totals_derived(&next);
            next
        })
    }

    fn assert_totals_derived(state: &CartState) {
        let quantity: u32 = state.items().iter().map(|i| i.quantity).sum();
        let price: i64 = state.items().iter().map(|i| i.price * i64::from(i.quantity)).sum();
        assert_eq!(state.total_items(), quantity);
        assert_eq!(state.total_price(), price);
    }

    fn loaded() -> CartState {
        reduce(CartState::new(), CartCommand::LoadCart(Vec::new()))
    }

    #[test]
    fn test_add_same_item_twice_merges() {
        let item = draft("A", 1000, 5).with_quantity(1);
        let state = apply(
            loaded(),
            vec![CartCommand::AddItem(item.clone()), CartCommand::AddItem(item)],
        );

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 2);
        assert_eq!(state.total_price(), 2000);
    }

    #[test]
    fn test_new_item_clamped_to_stock() {
        let state = apply(
            loaded(),
            vec![CartCommand::AddItem(draft("B", 5000, 3).with_quantity(10))],
        );

        assert_eq!(state.items()[0].quantity, 3);
        assert_eq!(state.total_price(), 15000);
    }

    #[test]
    fn test_merge_clamped_to_existing_stock() {
        let commands = (0..4)
            .map(|_| CartCommand::AddItem(draft("A", 1000, 5).with_quantity(2)))
            .collect();
        let state = apply(loaded(), commands);

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 5);
        assert_eq!(state.total_items(), 5);
    }

    #[test]
    fn test_merge_uses_snapshot_of_existing_line() {
        let state = apply(
            loaded(),
            vec![
                CartCommand::AddItem(draft("A", 1000, 2)),
                CartCommand::AddItem(draft("A", 1000, 10).with_quantity(5)),
            ],
        );

        assert_eq!(state.items()[0].quantity, 2);
        assert_eq!(state.items()[0].stock, 2);
    }

    #[test]
    fn test_add_to_full_line_keeps_it() {
        let state = apply(
            loaded(),
            vec![
                CartCommand::AddItem(draft("A", 1000, 2).with_quantity(2)),
                CartCommand::AddItem(draft("A", 1000, 2)),
                CartCommand::AddItem(draft("A", 1000, 0)),
            ],
        );

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 2);
        assert_eq!(state.total_price(), 2000);
    }

    #[test]
    fn test_variants_create_separate_lines() {
        let red = Variants::default().with_color("rojo");
        let blue = Variants::default().with_color("azul");
        let state = apply(
            loaded(),
            vec![
                CartCommand::AddItem(draft("A", 1000, 5)),
                CartCommand::AddItem(draft("A", 1000, 5).with_variants(red.clone())),
                CartCommand::AddItem(draft("A", 1000, 5).with_variants(blue)),
                CartCommand::AddItem(draft("A", 1000, 5).with_variants(red)),
            ],
        );

        let quantities: Vec<u32> = state.items().iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![1, 2, 1]);
        assert_eq!(state.total_items(), 4);
    }

    #[test]
    fn test_empty_variants_merge_with_no_variants() {
        let state = apply(
            loaded(),
            vec![
                CartCommand::AddItem(draft("A", 1000, 5)),
                CartCommand::AddItem(draft("A", 1000, 5).with_variants(Variants::default())),
            ],
        );
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].quantity, 2);
    }

    #[test]
    fn test_zero_stock_adds_nothing() {
        let state = apply(loaded(), vec![CartCommand::AddItem(draft("P", 85000, 0))]);
        assert!(state.is_empty());
    }

    #[test]
    fn test_remove_drops_every_variant() {
        let state = apply(
            loaded(),
            vec![
                CartCommand::AddItem(draft("A", 1000, 5).with_variants(Variants::default().with_size("S"))),
                CartCommand::AddItem(draft("A", 1000, 5).with_variants(Variants::default().with_size("M"))),
                CartCommand::AddItem(draft("B", 2000, 5)),
                CartCommand::remove_item("A"),
            ],
        );

        assert_eq!(state.items().len(), 1);
        assert_eq!(state.items()[0].id.as_str(), "B");
        assert_eq!(state.total_price(), 2000);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let before = apply(loaded(), vec![CartCommand::AddItem(draft("A", 1000, 5))]);
        let after = reduce(before.clone(), CartCommand::remove_item("Z"));
        assert_eq!(before, after);
    }

    #[test]
    fn test_update_quantity_clamps_and_spans_variants() {
        let state = apply(
            loaded(),
            vec![
                CartCommand::AddItem(draft("A", 1000, 4).with_variants(Variants::default().with_size("S"))),
                CartCommand::AddItem(draft("A", 1000, 9).with_variants(Variants::default().with_size("M"))),
                CartCommand::update_quantity("A", 6),
            ],
        );

        let quantities: Vec<u32> = state.items().iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![4, 6]);
        assert_eq!(state.total_price(), 10000);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        for quantity in [0, -3] {
            let state = apply(
                loaded(),
                vec![
                    CartCommand::AddItem(draft("A", 1000, 5)),
                    CartCommand::update_quantity("A", quantity),
                ],
            );
            assert!(state.is_empty());
            assert_eq!(state.total_items(), 0);
        }
    }

    #[test]
    fn test_clear_cart_resets_everything() {
        let state = apply(
            loaded(),
            vec![
                CartCommand::AddItem(draft("A", 1000, 5).with_quantity(3)),
                CartCommand::AddItem(draft("B", 500, 5)),
                CartCommand::ClearCart,
            ],
        );

        assert!(state.is_empty());
        assert_eq!(state.total_items(), 0);
        assert_eq!(state.total_price(), 0);
    }

    #[test]
    fn test_load_cart_replaces_items_and_finishes_loading() {
        let items = vec![draft("A", 1000, 5).into_line_item(3)];
        let state = reduce(CartState::new(), CartCommand::LoadCart(items));

        assert!(!state.is_loading());
        assert_eq!(state.total_items(), 3);
        assert_eq!(state.total_price(), 3000);
    }

    #[test]
    fn test_set_loading_only_touches_flag() {
        let before = apply(loaded(), vec![CartCommand::AddItem(draft("A", 1000, 5))]);
        let after = reduce(before.clone(), CartCommand::SetLoading(true));

        assert!(after.is_loading());
        assert_eq!(after.items(), before.items());
        assert_eq!(after.total_price(), before.total_price());
    }

    #[test]
    fn test_add_item_constructor_validates() {
        assert!(CartCommand::add_item(draft("", 1000, 5)).is_err());
        assert!(matches!(
            CartCommand::add_item(draft("A", 1000, 5)),
            Ok(CartCommand::AddItem(_))
        ));
    }

    #[test]
    fn test_insertion_order_is_stable() {
        let state = apply(
            loaded(),
            vec![
                CartCommand::AddItem(draft("C", 1, 5)),
                CartCommand::AddItem(draft("A", 1, 5)),
                CartCommand::AddItem(draft("B", 1, 5)),
                CartCommand::AddItem(draft("A", 1, 5)),
                CartCommand::update_quantity("C", 2),
            ],
        );
        let ids: Vec<&str> = state.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }
}
