//! Checkout pricing.
//!
//! Prices are in euros. Delivery and gift wrapping fees are quoted in CFA
//! francs and converted with [`Price::to_eur`] before they enter a total.

use core::fmt;

use rust_decimal::Decimal;

use eclat_core::{Country, Price, PriceBreakdown, ShippingDetails, ShippingMethod};

/// Promo discount: 20 % of the subtotal.
pub const DISCOUNT_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// VAT rate, already included in catalog prices.
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Subtotals strictly above this amount (EUR) ship free by standard
/// delivery to Senegal.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Flat gift wrapping fee in CFA francs.
pub const GIFT_WRAP_FEE_XOF: i64 = 1_000;

// =============================================================================
// Promo codes
// =============================================================================

/// The single promo code recognized at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode(String);

impl PromoCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_owned())
    }

    /// Whether `input` is this code, ignoring case and surrounding spaces.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        !self.0.is_empty() && self.0.eq_ignore_ascii_case(input.trim())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PromoCode {
    fn default() -> Self {
        Self::new("PROMO20")
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Fees
// =============================================================================

/// Delivery fee for a destination, method and cart subtotal (EUR).
#[must_use]
pub fn shipping_fee(country: Country, method: ShippingMethod, subtotal: Decimal) -> Price {
    let above_threshold = subtotal > FREE_SHIPPING_THRESHOLD;
    let francs = match (country, method) {
        (Country::Senegal, ShippingMethod::Standard) if above_threshold => 0,
        (Country::Senegal, ShippingMethod::Standard) => 1_500,
        (Country::Senegal, ShippingMethod::Express) => 3_000,
        (Country::Mali, ShippingMethod::Standard) => 5_000,
        (Country::Mali, ShippingMethod::Express) => 7_500,
        (Country::Guinea, ShippingMethod::Standard) => 5_500,
        (Country::Guinea, ShippingMethod::Express) => 8_000,
    };
    Price::xof(francs)
}

/// Gift wrapping fee, zero when not requested.
#[must_use]
pub fn gift_wrap_fee(requested: bool) -> Price {
    Price::xof(if requested { GIFT_WRAP_FEE_XOF } else { 0 })
}

/// Price a checkout.
///
/// `total = subtotal - discount + shipping + gift_wrap`. The tax line is
/// the VAT share of `subtotal - discount` and is not added again.
#[must_use]
pub fn quote(subtotal: Decimal, promo_applied: bool, details: &ShippingDetails) -> PriceBreakdown {
    let discount = if promo_applied {
        subtotal * DISCOUNT_RATE
    } else {
        Decimal::ZERO
    };
    let shipping = shipping_fee(details.country, details.method, subtotal).to_eur();
    let gift_wrap = gift_wrap_fee(details.gift_wrap).to_eur();
    let tax = (subtotal - discount) * TAX_RATE;

    PriceBreakdown {
        subtotal,
        discount,
        shipping,
        gift_wrap,
        tax,
        total: subtotal - discount + shipping + gift_wrap,
    }
}
