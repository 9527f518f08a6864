//! End-to-end checkout: cart, promo, delivery, payment, confirmation.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use eclat_core::{Country, OrderStatus, PaymentMethod, ProductId, ShippingMethod};
use eclat_integration_tests::TestContext;
use eclat_storefront::AppError;
use eclat_storefront::services::checkout::{CheckoutError, CheckoutStep};

fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

#[tokio::test]
async fn test_member_checkout_places_order() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();
    state.login("sophie@example.com", "password123").await.unwrap();

    // 2 x Sérum Hydratant (39.90) + 1 x Crème Anti-âge (49.90)
    state.add_product_by_id(&id("p1")).unwrap();
    state.add_product_by_id(&id("p1")).unwrap();
    state.add_product_by_id(&id("p2")).unwrap();
    let count_before = state.cart_count();
    let subtotal = state.cart_total();

    let mut checkout = state.begin_checkout().unwrap();
    let before_promo = checkout.quote(subtotal);
    assert!(checkout.apply_promo_code("NOPE").is_err());
    assert_eq!(checkout.quote(subtotal), before_promo);
    checkout.apply_promo_code("promo20").unwrap();

    checkout.proceed(state.cart()).unwrap();
    checkout.shipping_mut().country = Country::Senegal;
    checkout.shipping_mut().method = ShippingMethod::Standard;
    assert_eq!(checkout.proceed(state.cart()).unwrap(), CheckoutStep::Payment);
    checkout.set_payment_method(PaymentMethod::Wave);

    let order = state.place_order(&mut checkout).await.unwrap();

    assert_eq!(order.item_count, count_before);
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.pricing.subtotal, subtotal);
    assert_eq!(order.pricing.discount, subtotal * Decimal::new(20, 2));
    // Above the threshold: free standard delivery to Senegal.
    assert_eq!(order.pricing.shipping, Decimal::ZERO);
    assert_eq!(order.total, subtotal - order.pricing.discount);
    assert_eq!(order.customer_email, "sophie@example.com");

    assert!(state.cart().is_empty());
    assert_eq!(state.orders().len(), 1);
    assert_eq!(checkout.step(), CheckoutStep::Confirmation);
}

#[tokio::test]
async fn test_guest_checkout_to_guinea_with_gift_wrap() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();
    state.continue_as_guest().unwrap();
    state.add_product_by_id(&id("m3")).unwrap();

    let mut checkout = state.begin_checkout().unwrap();
    checkout.proceed(state.cart()).unwrap();

    // Guests have no profile to prefill from.
    assert!(matches!(
        checkout.proceed(state.cart()),
        Err(CheckoutError::MissingShippingDetails)
    ));

    {
        let details = checkout.shipping_mut();
        details.country = Country::Guinea;
        details.method = ShippingMethod::Express;
        details.address = "Quartier Kaloum, Conakry".to_owned();
        details.phone = "622 00 00 00".to_owned();
        details.gift_wrap = true;
    }
    checkout.proceed(state.cart()).unwrap();

    let order = state.place_order(&mut checkout).await.unwrap();
    // 8 000 XOF and 1 000 XOF at 655.957 XOF per euro.
    assert_eq!(order.pricing.shipping, Decimal::new(1220, 2));
    assert_eq!(order.pricing.gift_wrap, Decimal::new(152, 2));
    assert_eq!(
        order.total,
        order.pricing.subtotal + Decimal::new(1220, 2) + Decimal::new(152, 2)
    );
    // No notification email: falls back to the guest placeholder.
    assert_eq!(order.customer_email, "guest@example.com");
}

#[tokio::test]
async fn test_orders_are_newest_first() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();
    state.login("sophie@example.com", "password123").await.unwrap();

    let mut ids = Vec::new();
    for product in ["v1", "p6"] {
        state.add_product_by_id(&id(product)).unwrap();
        let mut checkout = state.begin_checkout().unwrap();
        checkout.proceed(state.cart()).unwrap();
        checkout.proceed(state.cart()).unwrap();
        ids.push(state.place_order(&mut checkout).await.unwrap().id);
    }

    let history: Vec<_> = state.orders().iter().map(|o| o.id.clone()).collect();
    assert_eq!(history, [ids[1].clone(), ids[0].clone()]);
    assert_ne!(ids[0], ids[1]);
}

#[tokio::test]
async fn test_checkout_refused_without_session_or_items() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();

    assert!(matches!(
        state.begin_checkout(),
        Err(AppError::Checkout(CheckoutError::AccessDenied))
    ));

    state.continue_as_guest().unwrap();
    let mut checkout = state.begin_checkout().unwrap();
    assert!(matches!(
        checkout.proceed(state.cart()),
        Err(CheckoutError::EmptyCart)
    ));
    assert_eq!(checkout.step(), CheckoutStep::Cart);
}
