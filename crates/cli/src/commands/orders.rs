//! Order history commands.

use eclat_core::OrderId;
use eclat_storefront::db::StateRepository;
use eclat_storefront::{AppError, AppState, Result};

use super::{breakdown_lines, eur, order_line};

pub fn list<R: StateRepository>(state: &AppState<R>) {
    if state.orders().is_empty() {
        println!("Aucune commande");
        return;
    }
    for order in state.orders() {
        println!("{}", order_line(order));
    }
}

/// Show one order in full.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id.
pub fn show<R: StateRepository>(state: &AppState<R>, id: &str) -> Result<()> {
    let order = state
        .order(&OrderId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    println!("Commande {}", order.id);
    println!("  Date       : {}", order.placed_at.format("%d/%m/%Y %H:%M"));
    println!("  Statut     : {}", order.status.label());
    println!("  Paiement   : {}", order.payment_method);
    println!(
        "  Livraison  : {} ({}), {}",
        order.shipping.country, order.shipping.method, order.shipping.address
    );
    println!("  Prévue le  : {}", order.estimated_delivery.format("%d/%m/%Y"));
    if !order.customer_email.is_empty() {
        println!("  Email      : {}", order.customer_email);
    }
    for line in &order.lines {
        println!(
            "    {} x {:<32} {:>10}",
            line.quantity,
            line.product.name,
            eur(line.line_total())
        );
    }
    for line in breakdown_lines(&order.pricing) {
        println!("  {line}");
    }
    Ok(())
}
