//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices and order totals are in euros. Delivery fees are quoted in
//! West-African CFA francs and converted at the fixed euro peg before they
//! are added to a total.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fixed conversion rate between the euro and the CFA franc (BCEAO peg).
pub const XOF_PER_EUR: Decimal = Decimal::from_parts(655_957, 0, 0, false, 3);

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., euros, not cents).
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

    /// Create a euro price.
    #[must_use]
    pub const fn eur(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::EUR)
    }

    /// Create a CFA franc price from a whole number of francs.
    #[must_use]
    pub fn xof(francs: i64) -> Self {
        Self::new(Decimal::from(francs), CurrencyCode::XOF)
    }

    /// Convert this price to euros, rounded half-up to the cent.
    #[must_use]
    pub fn to_eur(self) -> Decimal {
        let eur = match self.currency_code {
            CurrencyCode::EUR => self.amount,
            CurrencyCode::XOF => self.amount / XOF_PER_EUR,
        };
        round_cents(eur)
    }

    /// Whether the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency_code {
            CurrencyCode::EUR => write!(f, "{:.2} €", self.amount),
            CurrencyCode::XOF => write!(f, "{:.0} FCFA", self.amount),
        }
    }
}

/// ISO 4217 currency codes used by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    EUR,
    XOF,
}

/// Round a monetary amount half-up to two decimal places.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peg_value() {
        assert_eq!(XOF_PER_EUR.to_string(), "655.957");
    }

    #[test]
    fn test_xof_to_eur() {
        assert_eq!(Price::xof(3000).to_eur(), Decimal::new(457, 2));
        assert_eq!(Price::xof(0).to_eur(), Decimal::ZERO);
        assert_eq!(Price::xof(655_957).to_eur(), Decimal::new(1000, 0));
    }

    #[test]
    fn test_eur_passthrough_rounds() {
        assert_eq!(Price::eur(Decimal::new(12_345, 3)).to_eur(), Decimal::new(1235, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::eur(Decimal::new(399, 1)).to_string(), "39.90 €");
        assert_eq!(Price::xof(1500).to_string(), "1500 FCFA");
    }
}
