//! Catalog browsing commands.

use anyhow::Result;
use handyman_cart::catalog::{find_product, sample_catalog, Product, VariantOption};

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::stock_badge;

/// Run the catalog command.
pub fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = sample_catalog();
    match args.command {
        Some(CatalogCommand::List) | None => list_products(&catalog, ctx),
        Some(CatalogCommand::Show { id }) => show_product(find_product(&catalog, &id)?, ctx),
    }
}

fn list_products(catalog: &[Product], ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&catalog);
        return Ok(());
    }

    ctx.output.header("Catalog");
    ctx.output.table_row(&["ID", "PRODUCT", "CATEGORY", "PRICE", "STOCK"], &[4, 32, 10, 14, 16]);

    for product in catalog {
        let price = product.unit_price().display();
        let stock = stock_badge(product.stock);
        ctx.output.table_row(
            &[product.id.as_str(), &product.name, &product.category, &price, &stock],
            &[4, 32, 10, 14, 16],
        );
    }

    Ok(())
}

fn show_product(product: &Product, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("ID", product.id.as_str());
    if !product.sku.is_blank() {
        ctx.output.kv("SKU", product.sku.as_str());
    }
    ctx.output.kv("Category", &product.category);
    ctx.output.kv("Price", &product.unit_price().display());
    if let (Some(original), Some(percent)) = (product.original_price, product.discount_percent()) {
        let original = handyman_cart::Money::cop(original).display();
        ctx.output.kv("Was", &format!("{} (-{}%)", original, percent));
    }
    ctx.output.kv("Stock", &stock_badge(product.stock));

    print_options(ctx, "Colors", &product.colors);
    print_options(ctx, "Sizes", &product.sizes);

    Ok(())
}

fn print_options(ctx: &Context, title: &str, options: &[VariantOption]) {
    if options.is_empty() {
        return;
    }
    ctx.output.kv(title, "");
    for option in options {
        let label = if option.available {
            format!("{} ({})", option.value, option.label)
        } else {
            format!("{} ({}, unavailable)", option.value, option.label)
        };
        ctx.output.list_item(&label);
    }
}
