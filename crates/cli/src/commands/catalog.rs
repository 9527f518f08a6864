//! Catalog browsing.

use eclat_core::{Category, ProductId};
use eclat_storefront::AppState;
use eclat_storefront::db::StateRepository;

use super::product_line;

/// List products, optionally narrowed to a category and a tag.
pub fn list<R: StateRepository>(state: &AppState<R>, category: Option<Category>, tag: Option<&str>) {
    let products = state.catalog().products().iter().filter(|p| {
        category.is_none_or(|c| p.category == c)
            && tag.is_none_or(|t| p.tag.as_deref().is_some_and(|pt| pt.eq_ignore_ascii_case(t)))
    });

    let mut shown = 0usize;
    for product in products {
        println!("{}", product_line(product));
        shown += 1;
    }
    if shown == 0 {
        println!("Aucun produit trouvé");
    }
}

/// Show one product and whether it is in the cart or favorites.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id.
pub fn show<R: StateRepository>(state: &AppState<R>, id: &str) -> eclat_storefront::Result<()> {
    let id = ProductId::new(id);
    let product = state.product(&id)?;

    println!("{}", product.name);
    println!("  Référence : {}", product.id);
    println!("  Catégorie : {}", product.category);
    println!("  Prix      : {}", super::eur(product.price));
    if let Some(tag) = &product.tag {
        println!("  Étiquette : {tag}");
    }
    println!("  Image     : {}", product.image);
    if let Some(line) = state.cart().line(&id) {
        println!("  Dans le panier : {}", line.quantity);
    }
    if state.is_favorite(&id) {
        println!("  ♥ Favori");
    }
    Ok(())
}
