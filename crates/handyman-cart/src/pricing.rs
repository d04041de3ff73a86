//! Cart pricing calculations.
//!
//! Tax is a flat rate on the subtotal. Shipping is free for an empty cart or
//! a subtotal at or above the free-shipping threshold; otherwise it is picked
//! from weight tiers, where weight is a nominal per-unit weight times the
//! number of units.

use serde::{Deserialize, Serialize};

use crate::cart::CartState;
use crate::money::{Currency, Money};

/// One shipping band: carts up to `max_weight_grams` pay `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTier {
    /// Inclusive upper bound in grams.
    pub max_weight_grams: u64,
    /// Rate in the smallest currency unit.
    pub rate: i64,
}

/// Tax and shipping rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Tax rate in basis points (1900 = 19% IVA).
    pub tax_rate_bps: u32,
    /// Subtotal at or above which shipping is free.
    pub free_shipping_threshold: i64,
    /// Weight assumed for every unit in the cart.
    pub item_weight_grams: u64,
    /// Weight tiers, checked in order.
    pub shipping_tiers: Vec<ShippingTier>,
    /// Rate for carts heavier than every tier.
    pub heavy_rate: i64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate_bps: 1900,
            free_shipping_threshold: 100_000,
            item_weight_grams: 200,
            shipping_tiers: vec![
                ShippingTier {
                    max_weight_grams: 1_000,
                    rate: 8_000,
                },
                ShippingTier {
                    max_weight_grams: 3_000,
                    rate: 12_000,
                },
            ],
            heavy_rate: 15_000,
        }
    }
}

impl PricingPolicy {
    /// Nominal weight of everything in the cart.
    pub fn total_weight_grams(&self, state: &CartState) -> u64 {
        u64::from(state.total_items()).saturating_mul(self.item_weight_grams)
    }

    /// Tax on `subtotal`, rounded half-up to a whole unit.
    pub fn tax_for(&self, subtotal: i64) -> i64 {
        let scaled = i128::from(subtotal) * i128::from(self.tax_rate_bps);
        let rounded = (scaled + 5_000).div_euclid(10_000);
        i64::try_from(rounded).unwrap_or(i64::MAX)
    }

    /// Shipping for a cart with this subtotal and weight.
    pub fn shipping_for(&self, subtotal: i64, weight_grams: u64) -> i64 {
        if subtotal == 0 || subtotal >= self.free_shipping_threshold {
            return 0;
        }

        self.shipping_tiers
            .iter()
            .find(|tier| weight_grams <= tier.max_weight_grams)
            .map_or(self.heavy_rate, |tier| tier.rate)
    }

    /// Full breakdown for a subtotal and weight.
    pub fn summarize(&self, subtotal: i64, weight_grams: u64, currency: Currency) -> CartSummary {
        let tax = self.tax_for(subtotal);
        let shipping = self.shipping_for(subtotal, weight_grams);
        let total = subtotal.saturating_add(tax).saturating_add(shipping);

        CartSummary {
            subtotal: Money::new(subtotal, currency),
            tax: Money::new(tax, currency),
            shipping: Money::new(shipping, currency),
            total: Money::new(total, currency),
        }
    }

    /// Breakdown for a cart state.
    pub fn summary_for(&self, state: &CartState, currency: Currency) -> CartSummary {
        self.summarize(state.total_price(), self.total_weight_grams(state), currency)
    }
}

/// Pricing breakdown shown next to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Tax on the subtotal.
    pub tax: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// subtotal + tax + shipping.
    pub total: Money,
}

impl CartSummary {
    /// True when the cart has items and ships for free.
    pub fn has_free_shipping(&self) -> bool {
        self.subtotal.amount > 0 && self.shipping.is_zero()
    }
}
