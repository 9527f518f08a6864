//! Favorites commands.

use eclat_core::ProductId;
use eclat_storefront::db::StateRepository;
use eclat_storefront::{AppState, Result};

use super::product_line;

pub fn list<R: StateRepository>(state: &AppState<R>) {
    let favorites = state.favorites();
    if favorites.is_empty() {
        println!("Aucun favori");
        return;
    }
    for product in favorites.products() {
        println!("{}", product_line(product));
    }
}

/// Add a catalog product to favorites.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id.
pub fn add<R: StateRepository>(state: &mut AppState<R>, id: &str) -> Result<()> {
    let product = state.product(&ProductId::new(id))?.clone();
    if state.add_to_favorites(&product)? {
        println!("Ajouté aux favoris ({id})");
    } else {
        println!("{id} est déjà dans les favoris");
    }
    Ok(())
}

/// Remove a product from favorites.
///
/// # Errors
///
/// Returns `AppError::Repository` if favorites cannot be saved.
pub fn remove<R: StateRepository>(state: &mut AppState<R>, id: &str) -> Result<()> {
    if state.remove_from_favorites(&ProductId::new(id))? {
        println!("Retiré des favoris ({id})");
    } else {
        println!("{id} n'est pas dans les favoris");
    }
    Ok(())
}

/// Flip a product's favorite state.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id.
pub fn toggle<R: StateRepository>(state: &mut AppState<R>, id: &str) -> Result<()> {
    let product = state.product(&ProductId::new(id))?.clone();
    if state.toggle_favorite(&product)? {
        println!("♥ {} ajouté aux favoris", product.name);
    } else {
        println!("{} retiré des favoris", product.name);
    }
    Ok(())
}
