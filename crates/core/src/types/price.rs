//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are whole or fractional rupee amounts. Display follows the
//! storefront's `LKR 12,500` convention: en-US digit grouping, at most three
//! fractional digits and no trailing zeros.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Maximum fractional digits shown when formatting an amount.
const DISPLAY_SCALE: u32 = 3;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Sri Lankan rupees, the storefront's only currency.
    #[must_use]
    pub const fn lkr(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::LKR)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.currency_code.code(),
            group_thousands(self.amount)
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    LKR,
    USD,
}

impl CurrencyCode {
    /// The three-letter code used as the display prefix.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::LKR => "LKR",
            Self::USD => "USD",
        }
    }
}

/// Format an amount with comma thousands separators.
fn group_thousands(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (integer, fraction) = digits
        .split_once('.')
        .map_or((digits.as_str(), None), |(i, f)| (i, Some(f)));

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    let len = integer.len();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lkr(value: i64, scale: u32) -> Price {
        Price::lkr(Decimal::new(value, scale))
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(lkr(12_500, 0).to_string(), "LKR 12,500");
        assert_eq!(lkr(1_234_567, 0).to_string(), "LKR 1,234,567");
        assert_eq!(lkr(999, 0).to_string(), "LKR 999");
        assert_eq!(lkr(0, 0).to_string(), "LKR 0");
    }

    #[test]
    fn test_display_trims_fraction() {
        assert_eq!(lkr(1_234_500, 2).to_string(), "LKR 12,345");
        assert_eq!(lkr(1_234_550, 2).to_string(), "LKR 12,345.5");
    }

    #[test]
    fn test_display_rounds_to_three_places() {
        assert_eq!(lkr(12_345, 4).to_string(), "LKR 1.235");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(lkr(-4_500, 0).to_string(), "LKR -4,500");
    }

    #[test]
    fn test_currency_code_default() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::LKR);
        assert_eq!(CurrencyCode::USD.code(), "USD");
    }
}
