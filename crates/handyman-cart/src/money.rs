//! Money type for representing monetary values.
//!
//! Amounts are integers in the smallest unit of their currency. Colombian
//! pesos have no subunit, so a COP amount is a whole number of pesos; USD,
//! EUR and MXN amounts are cents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Non-breaking space used by the Spanish locales between symbol and amount.
const NBSP: char = '\u{a0}';

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    COP,
    USD,
    EUR,
    MXN,
}

impl Currency {
    /// Every supported currency, default first.
    pub const ALL: [Currency; 4] = [Currency::COP, Currency::USD, Currency::EUR, Currency::MXN];

    /// Get the currency code (e.g., "COP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::COP => "COP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::MXN => "MXN",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::COP | Currency::USD | Currency::MXN => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Locale used to render amounts in this currency.
    pub fn locale(&self) -> &'static str {
        match self {
            Currency::COP => "es-CO",
            Currency::USD => "en-US",
            Currency::EUR => "es-ES",
            Currency::MXN => "es-MX",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::COP => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "COP" => Some(Currency::COP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "MXN" => Some(Currency::MXN),
            _ => None,
        }
    }

    /// Parse a currency code, falling back to COP for anything unsupported.
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            tracing::warn!(code, "unsupported currency, using COP");
            Currency::default()
        })
    }

    /// Whether `code` names a supported currency.
    pub fn is_supported(code: &str) -> bool {
        Self::from_code(code).is_some()
    }

    pub(crate) fn style(&self) -> LocaleStyle {
        match self {
            Currency::COP => LocaleStyle {
                group: '.',
                decimal: ',',
                symbol_after: false,
                spaced: true,
                min_grouping: 1,
                spanish: true,
            },
            Currency::USD => LocaleStyle {
                group: ',',
                decimal: '.',
                symbol_after: false,
                spaced: false,
                min_grouping: 1,
                spanish: false,
            },
            Currency::EUR => LocaleStyle {
                group: '.',
                decimal: ',',
                symbol_after: true,
                spaced: true,
                min_grouping: 2,
                spanish: true,
            },
            Currency::MXN => LocaleStyle {
                group: ',',
                decimal: '.',
                symbol_after: false,
                spaced: false,
                min_grouping: 1,
                spanish: true,
            },
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Number rendering conventions of a locale.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocaleStyle {
    pub group: char,
    pub decimal: char,
    pub symbol_after: bool,
    pub spaced: bool,
    /// Integer digits required beyond the first group before separators appear.
    pub min_grouping: usize,
    /// Spanish-language compact suffixes ("mil", "M").
    pub spanish: bool,
}

impl LocaleStyle {
    /// Render `digits` (ASCII, no sign) with `places` implied decimals.
    pub(crate) fn number(&self, negative: bool, digits: &str, places: usize) -> String {
        let padded = format!("{:0>width$}", digits, width = places + 1);
        let (int_part, frac_part) = padded.split_at(padded.len() - places);

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.group_integer(int_part));
        if places > 0 {
            out.push(self.decimal);
            out.push_str(frac_part);
        }
        out
    }

    fn group_integer(&self, int_part: &str) -> String {
        let len = int_part.len();
        if len <= 3 || len - 3 < self.min_grouping {
            return int_part.to_string();
        }

        let mut out = String::with_capacity(len + len / 3);
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.group);
            }
            out.push(c);
        }
        out
    }

    /// Attach a currency symbol to an already formatted number.
    pub(crate) fn with_symbol(&self, number: &str, symbol: &str) -> String {
        let (sign, unsigned) = match number.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", number),
        };
        let space = if self.spaced { NBSP.to_string() } else { String::new() };

        if self.symbol_after {
            format!("{}{}{}{}", sign, unsigned, space, symbol)
        } else {
            format!("{}{}{}{}", sign, symbol, space, unsigned)
        }
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (whole pesos for
/// COP, cents for the others).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Shorthand for a peso amount.
    pub fn cop(amount: i64) -> Self {
        Self::new(amount, Currency::COP)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use handyman_cart::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount = (amount * multiplier as f64).round() as i64;
        Self::new(amount, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount as f64 / divisor as f64
    }

    /// Format with the currency's locale and symbol (e.g., "$ 45.000").
    pub fn display(&self) -> String {
        let style = self.currency.style();
        style.with_symbol(&self.display_amount(), self.currency.symbol())
    }

    /// Format as a display string without symbol (e.g., "45.000").
    pub fn display_amount(&self) -> String {
        let style = self.currency.style();
        let digits = self.amount.unsigned_abs().to_string();
        style.number(
            self.is_negative(),
            &digits,
            self.currency.decimal_places() as usize,
        )
    }

    /// Try to add another Money value, returning None if currencies don't match
    /// or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount.checked_add(other.amount)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount.checked_sub(other.amount)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, saturating at the numeric bounds.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount.saturating_mul(factor), self.currency)
    }

    /// Calculate a percentage of this amount, rounded to the nearest minor unit.
    pub fn percentage(&self, percent: f64) -> Money {
        let amount = (self.amount as f64 * percent / 100.0).round() as i64;
        Money::new(amount, self.currency)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount, 4999);

        let m = Money::from_decimal(45000.0, Currency::COP);
        assert_eq!(m.amount, 45000); // COP has no decimals
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_cop_display() {
        assert_eq!(Money::cop(45000).display(), "$\u{a0}45.000");
        assert_eq!(Money::cop(1_250_000).display(), "$\u{a0}1.250.000");
        assert_eq!(Money::cop(950).display(), "$\u{a0}950");
        assert_eq!(Money::cop(0).display(), "$\u{a0}0");
        assert_eq!(Money::cop(-8000).display(), "-$\u{a0}8.000");
    }

    #[test]
    fn test_usd_and_mxn_display() {
        assert_eq!(Money::new(123456, Currency::USD).display(), "$1,234.56");
        assert_eq!(Money::new(5, Currency::USD).display(), "$0.05");
        assert_eq!(Money::new(4500000, Currency::MXN).display(), "$45,000.00");
    }

    #[test]
    fn test_eur_display_groups_from_five_digits() {
        assert_eq!(Money::new(123456, Currency::EUR).display(), "1234,56\u{a0}\u{20ac}");
        assert_eq!(Money::new(4500000, Currency::EUR).display(), "45.000,00\u{a0}\u{20ac}");
    }

    #[test]
    fn test_display_amount_has_no_symbol() {
        assert_eq!(Money::cop(150000).display_amount(), "150.000");
        assert_eq!(Money::new(150000, Currency::USD).display_amount(), "1,500.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::cop(1000);
        let b = Money::cop(500);
        assert_eq!(a.try_add(&b), Some(Money::cop(1500)));
        assert_eq!(a.try_subtract(&b), Some(Money::cop(500)));
        assert_eq!((a * 3).amount, 3000);
        assert_eq!(a.try_add(&Money::new(1, Currency::USD)), None);
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::cop(60000);
        assert_eq!(m.percentage(25.0).amount, 15000);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("COP"), Some(Currency::COP));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("GBP"), None);
        assert_eq!(Currency::from_code_or_default("GBP"), Currency::COP);
        assert!(Currency::is_supported("mxn"));
    }

    #[test]
    fn test_currency_config() {
        assert_eq!(Currency::COP.locale(), "es-CO");
        assert_eq!(Currency::COP.decimal_places(), 0);
        assert_eq!(Currency::EUR.symbol(), "\u{20ac}");
        assert_eq!(Currency::default(), Currency::COP);
    }
}
