//! Non-interactive checkout.
//!
//! Runs every step of the checkout flow from command-line options: promo
//! code, delivery details, payment method, then order placement.

use chrono::Utc;

use eclat_core::{Country, PaymentMethod, ShippingDetails, ShippingMethod};
use eclat_storefront::db::StateRepository;
use eclat_storefront::services::checkout::CheckoutError;
use eclat_storefront::{AppError, AppState, Result};

use super::{breakdown_lines, eur};

/// Everything the checkout needs from the user.
#[derive(Debug, Clone, Default)]
pub struct CheckoutOptions {
    pub country: Country,
    pub method: ShippingMethod,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub instructions: Option<String>,
    pub notify_email: Option<String>,
    pub notify_sms: bool,
    pub gift_wrap: bool,
    pub promo: Option<String>,
    pub payment: PaymentMethod,
    pub quote_only: bool,
}

impl CheckoutOptions {
    /// Write these options over `details`, keeping prefilled address and
    /// phone when none was given.
    pub fn apply_to(&self, details: &mut ShippingDetails) {
        details.country = self.country;
        details.method = self.method;
        if let Some(address) = &self.address {
            details.address.clone_from(address);
        }
        if let Some(phone) = &self.phone {
            details.phone.clone_from(phone);
        }
        if let Some(instructions) = &self.instructions {
            details.instructions.clone_from(instructions);
        }
        details.notification_email.clone_from(&self.notify_email);
        details.notify_sms = self.notify_sms;
        details.gift_wrap = self.gift_wrap;
    }
}

/// Run the checkout and place the order unless `quote_only` is set.
///
/// # Errors
///
/// Returns `AppError::Checkout` when a step's guard fails (anonymous
/// session, empty cart, missing address or phone).
pub async fn run<R: StateRepository>(
    state: &mut AppState<R>,
    options: CheckoutOptions,
) -> Result<()> {
    let mut checkout = state.begin_checkout()?;

    if let Some(code) = &options.promo {
        match checkout.apply_promo_code(code) {
            Ok(()) => println!("Code promo appliqué : -20%"),
            Err(e @ CheckoutError::InvalidPromoCode(_)) => {
                println!("{}", AppError::from(e).user_message());
            }
            Err(e) => return Err(e.into()),
        }
    }

    checkout.proceed(state.cart())?;
    options.apply_to(checkout.shipping_mut());
    checkout.proceed(state.cart())?;
    checkout.set_payment_method(options.payment);

    let details = checkout.shipping();
    println!(
        "Livraison {} vers {} : {}",
        details.method,
        details.country,
        details.address
    );
    println!(
        "Livraison estimée le {}",
        checkout
            .estimated_delivery(Utc::now().date_naive())
            .format("%d/%m/%Y")
    );
    println!("Paiement : {}", checkout.payment_method());
    for line in breakdown_lines(&checkout.quote(state.cart_total())) {
        println!("{line}");
    }

    if options.quote_only {
        return Ok(());
    }

    let order = state.place_order(&mut checkout).await?;
    println!();
    println!("Merci pour votre commande !");
    println!("Numéro de commande : {}", order.id);
    println!("Montant payé       : {}", eur(order.total));
    if !order.customer_email.is_empty() {
        println!("Confirmation envoyée à {}", order.customer_email);
    }
    Ok(())
}
