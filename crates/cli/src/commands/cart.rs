//! Cart commands.

use eclat_core::ProductId;
use eclat_storefront::db::StateRepository;
use eclat_storefront::{AppState, Result};

use super::eur;

/// Print cart lines and totals.
pub fn show<R: StateRepository>(state: &AppState<R>) {
    let cart = state.cart();
    if cart.is_empty() {
        println!("Votre panier est vide");
        return;
    }
    for line in cart.lines() {
        println!(
            "{:<4} {:<32} {:>3} x {:>10} = {:>10}",
            line.product.id,
            line.product.name,
            line.quantity,
            eur(line.product.price),
            eur(line.line_total())
        );
    }
    println!("{} article(s), total {}", state.cart_count(), eur(state.cart_total()));
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id.
pub fn add<R: StateRepository>(state: &mut AppState<R>, id: &str) -> Result<()> {
    let quantity = state.add_product_by_id(&ProductId::new(id))?;
    println!("Ajouté au panier ({id} x {quantity})");
    Ok(())
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns `AppError::Repository` if the cart cannot be saved.
pub fn remove<R: StateRepository>(state: &mut AppState<R>, id: &str) -> Result<()> {
    if state.remove_from_cart(&ProductId::new(id))? {
        println!("Retiré du panier ({id})");
    } else {
        println!("{id} n'est pas dans le panier");
    }
    Ok(())
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns `AppError::Repository` if the cart cannot be saved.
pub fn set<R: StateRepository>(state: &mut AppState<R>, id: &str, quantity: u32) -> Result<()> {
    if state.update_cart_item_quantity(&ProductId::new(id), quantity)? {
        println!("Quantité mise à jour ({id} x {quantity})");
    } else {
        println!("Panier inchangé");
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns `AppError::Repository` if the cart cannot be saved.
pub fn clear<R: StateRepository>(state: &mut AppState<R>) -> Result<()> {
    state.clear_cart()?;
    println!("Panier vidé");
    Ok(())
}
