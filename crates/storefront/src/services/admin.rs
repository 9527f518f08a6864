//! Read-only admin views over the order history.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use eclat_core::{Order, OrderStatus};

/// Number of orders shown in the dashboard's "recent orders" list.
pub const RECENT_ORDERS: usize = 5;

/// Order status filter: every order, or only one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn accepts(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.trim().parse().map(Self::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

/// Criteria for the admin order list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
    pub status: StatusFilter,
    /// Case-insensitive substring of the order id or of a product name.
    pub search: Option<String>,
}

impl OrderQuery {
    #[must_use]
    pub fn matches(&self, order: &Order) -> bool {
        if !self.status.accepts(order.status) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                order
                    .id
                    .as_str()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
                    || order.mentions_product(needle)
            }
        }
    }
}

/// Orders matching `query`, in history order.
#[must_use]
pub fn filter_orders<'a>(orders: &'a [Order], query: &OrderQuery) -> Vec<&'a Order> {
    orders.iter().filter(|order| query.matches(order)).collect()
}

/// Dashboard headline figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary<'a> {
    pub order_count: usize,
    /// Sum of order totals, in euros.
    pub revenue: Decimal,
    pub items_sold: u64,
    /// Order count per status, in [`OrderStatus::ALL`] order.
    pub by_status: [(OrderStatus, usize); 3],
    /// Newest orders first.
    pub recent: Vec<&'a Order>,
}

/// Summarize a newest-first order history.
#[must_use]
pub fn summarize(orders: &[Order]) -> DashboardSummary<'_> {
    let by_status = OrderStatus::ALL.map(|status| {
        let count = orders.iter().filter(|o| o.status == status).count();
        (status, count)
    });

    DashboardSummary {
        order_count: orders.len(),
        revenue: orders.iter().map(|o| o.total).sum(),
        items_sold: orders.iter().map(|o| u64::from(o.item_count)).sum(),
        by_status,
        recent: orders.iter().take(RECENT_ORDERS).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use eclat_core::{
        CartLine, Category, OrderId, PaymentMethod, PriceBreakdown, Product, ProductId,
        ShippingDetails,
    };

    use super::*;

    fn order(number: u64, status: OrderStatus, product: &str, cents: i64) -> Order {
        let line = CartLine {
            product: Product {
                id: ProductId::new(format!("x{number}")),
                name: product.to_owned(),
                price: Decimal::new(cents, 2),
                image: String::new(),
                category: Category::Soins,
                tag: None,
            },
            quantity: 2,
        };
        Order {
            id: OrderId::from_number(number),
            placed_at: Utc::now(),
            status,
            total: line.line_total(),
            item_count: 2,
            lines: vec![line],
            shipping: ShippingDetails::default(),
            payment_method: PaymentMethod::Card,
            customer_email: String::new(),
            pricing: PriceBreakdown::default(),
            estimated_delivery: NaiveDate::default(),
        }
    }

    fn history() -> Vec<Order> {
        vec![
            order(7, OrderStatus::Processing, "Sérum Hydratant", 3990),
            order(6, OrderStatus::Shipped, "Crème Anti-âge", 5950),
            order(5, OrderStatus::Delivered, "Rouge à Lèvres Mat", 2490),
            order(4, OrderStatus::Delivered, "Eau de Parfum Floral", 7900),
            order(3, OrderStatus::Processing, "Masque Purifiant", 2990),
            order(2, OrderStatus::Shipped, "Mascara Volume", 2250),
        ]
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "delivered".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(OrderStatus::Delivered)
        );
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_filter_by_status() {
        let orders = history();
        let query = OrderQuery {
            status: StatusFilter::Only(OrderStatus::Delivered),
            search: None,
        };
        let ids: Vec<&str> = filter_orders(&orders, &query)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, ["ORD-000005", "ORD-000004"]);
    }

    #[test]
    fn test_search_by_id_and_product() {
        let orders = history();
        let by_id = OrderQuery {
            search: Some("ord-000003".to_owned()),
            ..OrderQuery::default()
        };
        assert_eq!(filter_orders(&orders, &by_id).len(), 1);

        let by_product = OrderQuery {
            status: StatusFilter::Only(OrderStatus::Processing),
            search: Some("sérum".to_owned()),
        };
        let found = filter_orders(&orders, &by_product);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "ORD-000007");

        let blank = OrderQuery {
            search: Some("  ".to_owned()),
            ..OrderQuery::default()
        };
        assert_eq!(filter_orders(&orders, &blank).len(), orders.len());
    }

    #[test]
    fn test_summary() {
        let orders = history();
        let summary = summarize(&orders);

        assert_eq!(summary.order_count, 6);
        assert_eq!(summary.items_sold, 12);
        assert_eq!(summary.revenue, Decimal::new(2 * (3990 + 5950 + 2490 + 7900 + 2990 + 2250), 2));
        assert_eq!(
            summary.by_status,
            [
                (OrderStatus::Processing, 2),
                (OrderStatus::Shipped, 2),
                (OrderStatus::Delivered, 2),
            ]
        );
        assert_eq!(summary.recent.len(), RECENT_ORDERS);
        assert_eq!(summary.recent[0].id.as_str(), "ORD-000007");
    }

    #[test]
    fn test_summary_of_empty_history() {
        let summary = summarize(&[]);
        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert!(summary.recent.is_empty());
    }
}
