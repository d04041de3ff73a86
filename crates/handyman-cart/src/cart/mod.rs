//! Shopping cart module.
//!
//! Contains the line-item model, the cart state and the reducer that drives it.

mod item;
mod reducer;
mod state;

pub use item::{variants_match, CartLineItem, LineItemDraft, Variants};
pub use reducer::{reduce, CartCommand};
pub use state::{calculate_totals, CartState};
