//! Favorite products.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// An ordered set of products keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Product>", into = "Vec<Product>")]
pub struct Favorites {
    products: Vec<Product>,
}

impl Favorites {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Insert `product` unless it is already present. Returns whether it was inserted.
    pub fn add(&mut self, product: &Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.products.push(product.clone());
        true
    }

    /// Remove the product with `product_id`. Returns whether it was present.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|p| &p.id != product_id);
        self.products.len() != before
    }

    /// Add the product if absent, remove it otherwise.
    ///
    /// Returns `true` when the product is a favorite afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.remove(&product.id) {
            false
        } else {
            self.products.push(product.clone());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.products.iter().any(|p| &p.id == product_id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<Product>> for Favorites {
    fn from(stored: Vec<Product>) -> Self {
        let mut favorites = Self::new();
        for product in &stored {
            favorites.add(product);
        }
        favorites
    }
}

impl From<Favorites> for Vec<Product> {
    fn from(favorites: Favorites) -> Self {
        favorites.products
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::Category;

    fn parfum(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: "Floral".to_owned(),
            price: Decimal::new(599, 1),
            image: String::new(),
            category: Category::Parfums,
            tag: None,
        }
    }

    #[test]
    fn test_membership_tracks_add_and_remove() {
        let mut favorites = Favorites::new();
        let floral = parfum("p5");
        assert!(!favorites.contains(&floral.id));
        assert!(favorites.add(&floral));
        assert!(favorites.contains(&floral.id));
        assert!(favorites.remove(&floral.id));
        assert!(!favorites.contains(&floral.id));
    }

    #[test]
    fn test_no_duplicates() {
        let mut favorites = Favorites::new();
        let floral = parfum("p5");
        assert!(favorites.add(&floral));
        assert!(!favorites.add(&floral));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut favorites = Favorites::new();
        let floral = parfum("p5");
        assert!(favorites.toggle(&floral));
        assert!(!favorites.toggle(&floral));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_duplicates_are_dropped_on_load() {
        let favorites = Favorites::from(vec![parfum("p5"), parfum("p6"), parfum("p5")]);
        assert_eq!(favorites.len(), 2);
    }
}
