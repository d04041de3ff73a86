//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod format;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List all products.
    List,
    /// Show details and variant options for a product.
    Show {
        /// Product ID.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartAction>,
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart contents.
    Show,
    /// Add a catalog product to the cart.
    Add {
        /// Product ID.
        id: String,

        /// Units to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Color variant.
        #[arg(long)]
        color: Option<String>,

        /// Size variant.
        #[arg(long)]
        size: Option<String>,
    },
    /// Remove a product (every variant) from the cart.
    Remove {
        /// Product ID.
        id: String,
    },
    /// Set the quantity of a product. Zero or less removes it.
    Update {
        /// Product ID.
        id: String,

        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
    /// Show subtotal, tax, shipping and total.
    Summary,
}

/// Arguments for the format command.
#[derive(Args)]
pub struct FormatArgs {
    #[command(subcommand)]
    pub command: FormatCommand,
}

#[derive(Subcommand)]
pub enum FormatCommand {
    /// Format an amount.
    Price {
        /// Amount in major units (e.g. 45000 or 12.50).
        #[arg(allow_hyphen_values = true)]
        amount: f64,

        /// Currency code.
        #[arg(short, long, default_value = "COP")]
        currency: String,

        /// Use compact notation.
        #[arg(long)]
        compact: bool,
    },
    /// Format a price range.
    Range {
        /// Lower bound in major units.
        min: f64,
        /// Upper bound in major units.
        max: f64,

        /// Currency code.
        #[arg(short, long, default_value = "COP")]
        currency: String,
    },
    /// Apply a percentage discount.
    Discount {
        /// Original amount in major units.
        amount: f64,
        /// Discount percentage.
        percent: f64,

        /// Currency code.
        #[arg(short, long, default_value = "COP")]
        currency: String,
    },
    /// Convert an amount between currencies.
    Convert {
        /// Amount in major units.
        amount: f64,

        /// Source currency code.
        #[arg(long)]
        from: String,

        /// Target currency code.
        #[arg(long)]
        to: String,

        /// Units of the target currency per unit of the source.
        #[arg(long)]
        rate: f64,
    },
    /// Parse a formatted price.
    Parse {
        /// Formatted input, e.g. "$ 150.000".
        input: String,

        /// Currency code.
        #[arg(short, long, default_value = "COP")]
        currency: String,
    },
    /// List supported currencies.
    Currencies,
}
