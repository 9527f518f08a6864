//! Placed orders.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartLine;
use super::id::OrderId;
use super::shipping::{Country, PaymentMethod, ShippingMethod};
use super::status::OrderStatus;

/// Price components of a checkout, all in euros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Cart total before any adjustment.
    pub subtotal: Decimal,
    /// Promo-code reduction.
    pub discount: Decimal,
    /// Delivery fee after conversion from CFA francs.
    pub shipping: Decimal,
    /// Gift wrapping fee after conversion from CFA francs.
    pub gift_wrap: Decimal,
    /// VAT included in `subtotal - discount`. Informational only.
    pub tax: Decimal,
    /// Amount charged: `subtotal - discount + shipping + gift_wrap`.
    pub total: Decimal,
}

/// Delivery details captured during checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub country: Country,
    pub method: ShippingMethod,
    pub address: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
    /// Address for order notifications; falls back to the account email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_email: Option<String>,
    #[serde(default)]
    pub notify_sms: bool,
    #[serde(default)]
    pub gift_wrap: bool,
}

impl ShippingDetails {
    /// Whether both required fields (address and phone) are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.address.trim().is_empty() && !self.phone.trim().is_empty()
    }
}

/// A placed order.
///
/// Orders are snapshots: lines and prices are copied at checkout time and
/// never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Decimal,
    /// Sum of line quantities.
    pub item_count: u32,
    pub lines: Vec<CartLine>,
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    pub customer_email: String,
    pub pricing: PriceBreakdown,
    pub estimated_delivery: NaiveDate,
}

impl Order {
    /// Whether any line's product name contains `needle` (case-insensitive).
    #[must_use]
    pub fn mentions_product(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.lines
            .iter()
            .any(|line| line.product.name.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipping_details_completeness() {
        let mut details = ShippingDetails::default();
        assert!(!details.is_complete());
        details.address = "Sacré-Cœur 3, Dakar".to_owned();
        assert!(!details.is_complete());
        details.phone = "   ".to_owned();
        assert!(!details.is_complete());
        details.phone = "77 123 45 67".to_owned();
        assert!(details.is_complete());
    }
}
