//! Admin views over orders placed through the storefront.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use eclat_core::{OrderStatus, ProductId};
use eclat_integration_tests::TestContext;
use eclat_storefront::services::admin::{OrderQuery, RECENT_ORDERS, StatusFilter};

#[tokio::test]
async fn test_dashboard_over_placed_orders() {
    let ctx = TestContext::new();
    let mut state = ctx.open().unwrap();
    state.login("sophie@example.com", "password123").await.unwrap();

    let baskets: [&[&str]; 6] = [
        &["p1"],
        &["v2", "v2"],
        &["m1", "m4"],
        &["p5"],
        &["v5"],
        &["p9", "m2", "m2"],
    ];
    for basket in baskets {
        for product in basket {
            state.add_product_by_id(&ProductId::new(*product)).unwrap();
        }
        let mut checkout = state.begin_checkout().unwrap();
        checkout.proceed(state.cart()).unwrap();
        checkout.proceed(state.cart()).unwrap();
        state.place_order(&mut checkout).await.unwrap();
    }

    let summary = state.dashboard();
    assert_eq!(summary.order_count, 6);
    assert_eq!(summary.items_sold, 10);
    assert_eq!(
        summary.revenue,
        state.orders().iter().map(|o| o.total).sum::<Decimal>()
    );
    assert_eq!(summary.by_status[0], (OrderStatus::Processing, 6));
    assert_eq!(summary.recent.len(), RECENT_ORDERS);
    assert_eq!(summary.recent[0].id, state.orders()[0].id);

    let shipped = OrderQuery {
        status: StatusFilter::Only(OrderStatus::Shipped),
        search: None,
    };
    assert!(state.admin_orders(&shipped).is_empty());

    let mascara = OrderQuery {
        status: "all".parse().unwrap(),
        search: Some("MASCARA".to_owned()),
    };
    let found = state.admin_orders(&mascara);
    assert!(!found.is_empty());
    assert!(found.iter().all(|o| o.mentions_product("mascara")));

    let by_id = OrderQuery {
        search: Some(state.orders()[3].id.as_str().to_lowercase()),
        ..OrderQuery::default()
    };
    assert_eq!(state.admin_orders(&by_id).len(), 1);
}
