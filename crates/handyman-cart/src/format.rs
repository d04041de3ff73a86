//! Price formatting helpers built on [`Money`].

use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};

/// Format a minor-unit amount in the currency named by `code`.
///
/// Unsupported codes fall back to COP with a logged warning.
pub fn format_price(amount: i64, code: &str) -> String {
    Money::new(amount, Currency::from_code_or_default(code)).display()
}

/// Format only the number, without the currency symbol.
pub fn format_number(amount: i64, code: &str) -> String {
    Money::new(amount, Currency::from_code_or_default(code)).display_amount()
}

/// Format a price in compact notation (e.g., "$1.5K", "$ 45 mil").
///
/// At most one fractional digit is kept, and trailing zeros are dropped.
pub fn format_compact(money: &Money) -> String {
    let style = money.currency.style();
    let value = money.to_decimal();
    let negative = value < 0.0;
    let mut magnitude = value.abs();

    let suffixes: &[&str] = if style.spanish {
        &["", "\u{a0}mil", "\u{a0}M", "\u{a0}mil\u{a0}M", "\u{a0}B"]
    } else {
        &["", "K", "M", "B", "T"]
    };

    let mut tier = 0;
    while magnitude >= 1000.0 && tier + 1 < suffixes.len() {
        magnitude /= 1000.0;
        tier += 1;
    }
    let mut rounded = (magnitude * 10.0).round() / 10.0;
    if rounded >= 1000.0 && tier + 1 < suffixes.len() {
        rounded = (rounded / 1000.0 * 10.0).round() / 10.0;
        tier += 1;
    }

    let tenths = (rounded * 10.0).round() as u64;
    let mut number = if tenths % 10 == 0 {
        style.number(negative, &(tenths / 10).to_string(), 0)
    } else {
        style.number(negative, &tenths.to_string(), 1)
    };
    number.push_str(suffixes[tier]);

    style.with_symbol(&number, money.currency.symbol())
}

/// Format a price range; equal bounds collapse to a single price.
pub fn format_price_range(min: &Money, max: &Money) -> String {
    if min == max {
        return min.display();
    }
    format!("{} - {}", min.display(), max.display())
}

/// Result of applying a percentage discount to a price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Price before the discount.
    pub original_price: Money,
    /// Price after the discount.
    pub final_price: Money,
    /// Amount taken off.
    pub discount_amount: Money,
    /// Discount percentage (0-100).
    pub percent: f64,
}

impl Discount {
    /// Human-readable percentage (e.g., "25%").
    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent)
    }

    /// Amount saved, same as `discount_amount`.
    pub fn savings(&self) -> Money {
        self.discount_amount
    }
}

/// Apply a percentage discount to `original`.
pub fn calculate_discount(original: Money, percent: f64) -> Discount {
    let discount_amount = original.percentage(percent);
    let final_price = Money::new(original.amount - discount_amount.amount, original.currency);
    Discount {
        original_price: original,
        final_price,
        discount_amount,
        percent,
    }
}

/// Percentage saved going from `original` to `current`, rounded to a whole number.
///
/// Returns `None` when there is no saving to show.
pub fn discount_percent(original: &Money, current: &Money) -> Option<u32> {
    if original.currency != current.currency || original.amount <= current.amount || original.amount <= 0 {
        return None;
    }
    let saved = (original.amount - current.amount) as f64 / original.amount as f64;
    Some((saved * 100.0).round() as u32)
}

/// Convert a price into another currency using an exchange rate.
///
/// Same-currency conversions return the input unchanged.
pub fn convert_price(money: &Money, to: Currency, exchange_rate: f64) -> Money {
    if money.currency == to {
        return *money;
    }
    Money::from_decimal(money.to_decimal() * exchange_rate, to)
}

/// Parse a formatted price back into money using the currency's separators.
///
/// Returns `None` when no number can be recovered.
///
/// ```
/// use handyman_cart::format::parse_price;
/// use handyman_cart::money::{Currency, Money};
/// assert_eq!(parse_price("$ 150.000", Currency::COP), Some(Money::cop(150000)));
/// ```
pub fn parse_price(input: &str, currency: Currency) -> Option<Money> {
    let style = currency.style();
    let negative = input.trim_start().starts_with('-');

    let mut normalized = String::with_capacity(input.len());
    for c in input.chars() {
        if c.is_ascii_digit() {
            normalized.push(c);
        } else if c == style.decimal {
            normalized.push('.');
        }
    }

    let value: f64 = normalized.parse().ok()?;
    let value = if negative { -value } else { value };
    Some(Money::from_decimal(value, currency))
}
