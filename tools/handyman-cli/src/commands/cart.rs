//! Cart commands.
//!
//! Every invocation hydrates the persisted cart, applies at most one change
//! and closes the store so the write lands before the process exits.

use anyhow::{Context as _, Result};
use handyman_cart::cart::Variants;
use handyman_cart::catalog::{find_product, sample_catalog};
use handyman_cart::CartStore;
use serde_json::json;

use super::{CartAction, CartArgs};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart().await?;

    let result = apply(args.command.unwrap_or(CartAction::Show), &mut store, ctx);

    store.close().await.context("Failed to flush cart storage")?;
    result
}

fn apply(action: CartAction, store: &mut CartStore, ctx: &Context) -> Result<()> {
    match action {
        CartAction::Show => show_cart(store, ctx),
        CartAction::Add {
            id,
            quantity,
            color,
            size,
        } => {
            let catalog = sample_catalog();
            let product = find_product(&catalog, &id)?;
            let selection = Variants {
                color,
                size,
                material: None,
            };
            let before = store.get_item_quantity(id.as_str(), Some(&selection));
            store.add_item(product.to_draft(selection.clone(), quantity)?)?;
            let after = store.get_item_quantity(id.as_str(), Some(&selection));

            if after.saturating_sub(before) < quantity {
                ctx.output.warn(&format!(
                    "Only {} of {} unit(s) added; {} in stock",
                    after.saturating_sub(before),
                    quantity,
                    product.stock
                ));
            }
            if let Some(message) = in_cart_message(&product.name, after) {
                ctx.output.success(&message);
            }
            show_cart(store, ctx)
        }
        CartAction::Remove { id } => {
            if !store.state().items().iter().any(|item| item.id == *id.as_str()) {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
            store.remove_item(id.as_str());
            show_cart(store, ctx)
        }
        CartAction::Update { id, quantity } => {
            store.update_quantity(id.as_str(), quantity);
            show_cart(store, ctx)
        }
        CartAction::Clear => {
            store.clear_cart();
            ctx.output.success("Cart cleared");
            show_cart(store, ctx)
        }
        CartAction::Summary => show_summary(store, ctx),
    }
}

/// Confirmation after an add; nothing when no unit ended up in the cart.
fn in_cart_message(name: &str, quantity: u32) -> Option<String> {
    (quantity > 0).then(|| format!("{} x{} in cart", name, quantity))
}

fn show_cart(store: &CartStore, ctx: &Context) -> Result<()> {
    let state = store.state();
    let summary = store.get_cart_summary();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "cart": state, "summary": summary }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if state.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let currency = store.config().currency;
    ctx.output.table_row(&["ID", "PRODUCT", "VARIANT", "QTY", "TOTAL"], &[4, 32, 14, 6, 14]);
    for item in state.items() {
        let variant = item
            .variants
            .as_ref()
            .map(Variants::label)
            .unwrap_or_default();
        let quantity = item.quantity.to_string();
        let total = handyman_cart::Money::new(item.line_total(), currency).display();
        ctx.output.table_row(
            &[item.id.as_str(), &item.name, &variant, &quantity, &total],
            &[4, 32, 14, 6, 14],
        );
    }

    ctx.output.info("");
    ctx.output.kv("Items", &state.total_items().to_string());
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    Ok(())
}

fn show_summary(store: &CartStore, ctx: &Context) -> Result<()> {
    let summary = store.get_cart_summary();

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Summary");
    ctx.output.kv("Subtotal", &summary.subtotal.display());
    ctx.output.kv("Tax (IVA)", &summary.tax.display());
    let shipping = if summary.has_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.display()
    };
    ctx.output.kv("Shipping", &shipping);
    ctx.output.kv("Total", &summary.total.display());
    ctx.output.debug(&format!("Weight: {} g", store.total_weight_grams()));
    Ok(())
}
