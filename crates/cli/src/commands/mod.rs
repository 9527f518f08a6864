//! Command implementations.
//!
//! Each command works on an [`AppState`](eclat_storefront::AppState) and
//! prints plain text to stdout.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod favorites;
pub mod orders;

use rust_decimal::Decimal;

use eclat_core::{Order, Price, PriceBreakdown, Product, round_cents};

/// Euro amount rounded to the cent, e.g. `39.90 €`.
pub fn eur(amount: Decimal) -> String {
    Price::eur(round_cents(amount)).to_string()
}

/// One-line product summary.
pub fn product_line(product: &Product) -> String {
    let mut line = format!(
        "{:<4} {:<32} {:>10}  [{}]",
        product.id,
        product.name,
        eur(product.price),
        product.category
    );
    if let Some(tag) = &product.tag {
        line.push(' ');
        line.push_str(tag);
    }
    line
}

/// One-line order summary.
pub fn order_line(order: &Order) -> String {
    format!(
        "{}  {}  {:<9} {:>3} article(s)  {:>10}",
        order.id,
        order.placed_at.format("%d/%m/%Y"),
        order.status.label(),
        order.item_count,
        eur(order.total)
    )
}

/// Price breakdown, one component per line.
pub fn breakdown_lines(pricing: &PriceBreakdown) -> Vec<String> {
    let mut lines = vec![format!("Sous-total        {:>10}", eur(pricing.subtotal))];
    if !pricing.discount.is_zero() {
        lines.push(format!("Réduction         {:>10}", format!("-{}", eur(pricing.discount))));
    }
    let shipping = if pricing.shipping.is_zero() {
        "Gratuit".to_owned()
    } else {
        eur(pricing.shipping)
    };
    lines.push(format!("Livraison         {shipping:>10}"));
    if !pricing.gift_wrap.is_zero() {
        lines.push(format!("Emballage cadeau  {:>10}", eur(pricing.gift_wrap)));
    }
    lines.push(format!("TVA incluse (18%) {:>10}", eur(pricing.tax)));
    lines.push(format!("Total             {:>10}", eur(pricing.total)));
    lines
}

#[cfg(test)]
mod tests {
    use eclat_core::{Category, ProductId};

    use super::*;

    #[test]
    fn test_eur_rounds_to_cents() {
        assert_eq!(eur(Decimal::new(39_9, 1)), "39.90 €");
        assert_eq!(eur(Decimal::new(14_364, 3)), "14.36 €");
    }

    #[test]
    fn test_product_line_includes_tag() {
        let product = Product {
            id: ProductId::new("p1"),
            name: "Sérum Hydratant".to_owned(),
            price: Decimal::new(3990, 2),
            image: String::new(),
            category: Category::Visage,
            tag: Some("NOUVEAU".to_owned()),
        };
        let line = product_line(&product);
        assert!(line.starts_with("p1"));
        assert!(line.contains("39.90 €"));
        assert!(line.ends_with("[visage] NOUVEAU"));
    }

    #[test]
    fn test_breakdown_hides_zero_lines() {
        let pricing = PriceBreakdown {
            subtotal: Decimal::new(7980, 2),
            total: Decimal::new(7980, 2),
            tax: Decimal::new(14_364, 3),
            ..PriceBreakdown::default()
        };
        let lines = breakdown_lines(&pricing);
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("Gratuit"));
        assert!(!lines.iter().any(|l| l.starts_with("Réduction")));
    }
}
