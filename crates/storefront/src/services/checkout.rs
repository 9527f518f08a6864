//! Checkout state machine.
//!
//! ```text
//! Cart ──proceed──▶ Shipping ──proceed──▶ Payment ──place order──▶ Confirmation
//!      ◀───back────          ◀───back────
//! ```
//!
//! `Cart → Shipping` needs a non-empty cart and `Shipping → Payment` needs a
//! delivery address and phone number. Nothing leaves `Confirmation`; a new
//! [`Checkout`] is started instead.

use core::fmt;

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use eclat_core::{
    Cart, Order, OrderId, OrderStatus, PaymentMethod, PriceBreakdown, ShippingDetails,
};

use super::pricing::{self, PromoCode};
use crate::db::RepositoryError;

/// Address recorded on an order placed without one.
pub const DEFAULT_ADDRESS: &str = "Adresse par défaut";

/// Steps of the checkout flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckoutStep {
    #[default]
    Cart,
    Shipping,
    Payment,
    Confirmation,
}

impl CheckoutStep {
    pub const ALL: [Self; 4] = [Self::Cart, Self::Shipping, Self::Payment, Self::Confirmation];

    /// French label shown in the progress bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cart => "Panier",
            Self::Shipping => "Livraison",
            Self::Payment => "Paiement",
            Self::Confirmation => "Confirmation",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cart => "cart",
            Self::Shipping => "shipping",
            Self::Payment => "payment",
            Self::Confirmation => "confirmation",
        })
    }
}

/// Errors that can occur while checking out.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines.
    #[error("cart is empty")]
    EmptyCart,

    /// Delivery address or phone number is blank.
    #[error("delivery address and phone number are required")]
    MissingShippingDetails,

    /// The promo code is not recognized.
    #[error("invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// The requested action is not available from the current step.
    #[error("cannot {action} from the {from} step")]
    InvalidTransition {
        from: CheckoutStep,
        action: &'static str,
    },

    /// The session may not check out.
    #[error("sign in or continue as guest to check out")]
    AccessDenied,

    /// Persisting the order failed.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// One checkout in progress.
#[derive(Debug, Clone)]
pub struct Checkout {
    step: CheckoutStep,
    promo: PromoCode,
    promo_applied: bool,
    shipping: ShippingDetails,
    payment_method: PaymentMethod,
    placed_order: Option<OrderId>,
}

impl Checkout {
    /// Start a checkout at the cart step.
    #[must_use]
    pub fn new(promo: PromoCode) -> Self {
        Self {
            step: CheckoutStep::Cart,
            promo,
            promo_applied: false,
            shipping: ShippingDetails::default(),
            payment_method: PaymentMethod::default(),
            placed_order: None,
        }
    }

    #[must_use]
    pub const fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub const fn promo_applied(&self) -> bool {
        self.promo_applied
    }

    #[must_use]
    pub const fn shipping(&self) -> &ShippingDetails {
        &self.shipping
    }

    /// Delivery details.
    ///
    /// Edits made after `Confirmation` do not reach the placed order, which
    /// keeps its own snapshot.
    pub fn shipping_mut(&mut self) -> &mut ShippingDetails {
        &mut self.shipping
    }

    #[must_use]
    pub const fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    /// Id of the order placed by this checkout, once confirmed.
    #[must_use]
    pub const fn placed_order(&self) -> Option<&OrderId> {
        self.placed_order.as_ref()
    }

    /// Apply a promo code.
    ///
    /// An unknown code leaves the checkout unchanged, including a
    /// previously applied discount.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidPromoCode` for an unknown code and
    /// `CheckoutError::InvalidTransition` once the order is confirmed.
    pub fn apply_promo_code(&mut self, code: &str) -> Result<(), CheckoutError> {
        self.ensure_open("apply a promo code")?;
        if !self.promo.matches(code) {
            warn!(code, "Promo code rejected");
            return Err(CheckoutError::InvalidPromoCode(code.trim().to_owned()));
        }
        self.promo_applied = true;
        debug!(code = %self.promo, "Promo code applied");
        Ok(())
    }

    /// Move forward one step.
    ///
    /// Leaving `Payment` goes through order placement instead.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` or
    /// `CheckoutError::MissingShippingDetails` when the step's guard fails,
    /// and `CheckoutError::InvalidTransition` from `Payment` or
    /// `Confirmation`.
    pub fn proceed(&mut self, cart: &Cart) -> Result<CheckoutStep, CheckoutError> {
        let next = match self.step {
            CheckoutStep::Cart if cart.is_empty() => return Err(CheckoutError::EmptyCart),
            CheckoutStep::Cart => CheckoutStep::Shipping,
            CheckoutStep::Shipping if !self.shipping.is_complete() => {
                return Err(CheckoutError::MissingShippingDetails);
            }
            CheckoutStep::Shipping => CheckoutStep::Payment,
            from @ (CheckoutStep::Payment | CheckoutStep::Confirmation) => {
                return Err(CheckoutError::InvalidTransition {
                    from,
                    action: "proceed",
                });
            }
        };
        debug!(from = %self.step, to = %next, "Checkout step");
        self.step = next;
        Ok(next)
    }

    /// Move back one step.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidTransition` from `Cart` or
    /// `Confirmation`.
    pub fn back(&mut self) -> Result<CheckoutStep, CheckoutError> {
        let previous = match self.step {
            CheckoutStep::Shipping => CheckoutStep::Cart,
            CheckoutStep::Payment => CheckoutStep::Shipping,
            from @ (CheckoutStep::Cart | CheckoutStep::Confirmation) => {
                return Err(CheckoutError::InvalidTransition {
                    from,
                    action: "go back",
                });
            }
        };
        self.step = previous;
        Ok(previous)
    }

    /// Price the checkout for a cart subtotal.
    #[must_use]
    pub fn quote(&self, subtotal: Decimal) -> PriceBreakdown {
        pricing::quote(subtotal, self.promo_applied, &self.shipping)
    }

    /// Expected delivery date for an order placed on `placed_on`.
    #[must_use]
    pub fn estimated_delivery(&self, placed_on: NaiveDate) -> NaiveDate {
        let days = self.shipping.method.delivery_days(self.shipping.country);
        placed_on
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(placed_on)
    }

    /// Snapshot `cart` into an order.
    ///
    /// `session_email` is used when no notification email was given.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidTransition` unless at `Payment`, and
    /// `CheckoutError::EmptyCart` if the cart was emptied meanwhile.
    pub fn build_order(
        &self,
        cart: &Cart,
        id: OrderId,
        placed_at: DateTime<Utc>,
        session_email: Option<&str>,
    ) -> Result<Order, CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::InvalidTransition {
                from: self.step,
                action: "place an order",
            });
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let pricing = self.quote(cart.total());
        let mut shipping = self.shipping.clone();
        if shipping.address.trim().is_empty() {
            DEFAULT_ADDRESS.clone_into(&mut shipping.address);
        }
        let customer_email = shipping
            .notification_email
            .as_deref()
            .filter(|email| !email.trim().is_empty())
            .or(session_email)
            .unwrap_or_default()
            .to_owned();

        Ok(Order {
            id,
            placed_at,
            status: OrderStatus::Processing,
            total: pricing.total,
            item_count: cart.count(),
            lines: cart.lines().to_vec(),
            estimated_delivery: self.estimated_delivery(placed_at.date_naive()),
            shipping,
            payment_method: self.payment_method,
            customer_email,
            pricing,
        })
    }

    /// Record the placed order and move to `Confirmation`.
    pub fn confirm(&mut self, order_id: OrderId) {
        self.placed_order = Some(order_id);
        self.step = CheckoutStep::Confirmation;
    }

    fn ensure_open(&self, action: &'static str) -> Result<(), CheckoutError> {
        if self.step == CheckoutStep::Confirmation {
            return Err(CheckoutError::InvalidTransition {
                from: self.step,
                action,
            });
        }
        Ok(())
    }
}

impl Default for Checkout {
    fn default() -> Self {
        Self::new(PromoCode::default())
    }
}
