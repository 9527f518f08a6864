//! Shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// One product entry in the cart.
///
/// Serialized flat: the product's fields plus `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// A cart: at most one line per product, in insertion order.
///
/// Totals are recomputed on every call rather than cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line or appends a new one with quantity 1.
    /// Returns the line's quantity afterwards.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
        });
        1
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| &line.product.id != product_id);
        self.lines.len() != before
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity below 1 is ignored, as is an unknown product. Returns
    /// whether the cart changed.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity < 1 {
            return false;
        }
        match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product.id == product_id)
    }
}

/// Rebuild a cart from stored lines, merging duplicates and dropping empty lines.
impl From<Vec<CartLine>> for Cart {
    fn from(stored: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in stored.into_iter().filter(|line| line.quantity >= 1) {
            match cart.line_mut(&line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Category;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Produit {id}"),
            price: Decimal::new(cents, 2),
            image: format!("https://img.example/{id}.jpg"),
            category: Category::Visage,
            tag: None,
        }
    }

    #[test]
    fn test_add_twice_yields_one_line_with_quantity_two() {
        let mut cart = Cart::new();
        let serum = product("p1", 3990);
        assert_eq!(cart.add(&serum), 1);
        assert_eq!(cart.add(&serum), 2);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line(&serum.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_totals_follow_lines() {
        let mut cart = Cart::new();
        let serum = product("p1", 3990);
        let huile = product("p4", 2990);
        cart.add(&serum);
        cart.add(&serum);
        cart.add(&huile);
        assert_eq!(cart.total(), Decimal::new(10_970, 2));
        assert_eq!(cart.count(), 3);

        cart.update_quantity(&huile.id, 4);
        assert_eq!(cart.total(), Decimal::new(7980 + 11_960, 2));
        assert_eq!(cart.count(), 6);
    }

    #[test]
    fn test_update_to_zero_is_noop() {
        let mut cart = Cart::new();
        let serum = product("p1", 3990);
        cart.add(&serum);
        cart.add(&serum);
        assert!(!cart.update_quantity(&serum.id, 0));
        assert_eq!(cart.line(&serum.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_update_unknown_product_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.update_quantity(&ProductId::new("nope"), 3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_deletes_line() {
        let mut cart = Cart::new();
        let serum = product("p1", 3990);
        cart.add(&serum);
        assert!(cart.remove(&serum.id));
        assert!(!cart.remove(&serum.id));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&product("m1", 2290));
        cart.add(&product("p5", 5990));
        cart.add(&product("m1", 2290));
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["m1", "p5"]);
    }

    #[test]
    fn test_json_is_flat_and_normalized_on_load() {
        let json = r#"[
            {"id":"p1","name":"Sérum Hydratant","price":"39.9","image":"a.jpg","category":"visage","tag":"NOUVEAU","quantity":1},
            {"id":"p1","name":"Sérum Hydratant","price":"39.9","image":"a.jpg","category":"visage","tag":"NOUVEAU","quantity":2},
            {"id":"p4","name":"Huile Corporelle","price":"29.9","image":"b.jpg","category":"soins","quantity":0}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 3);

        let out = serde_json::to_value(&cart).unwrap();
        assert_eq!(out[0]["quantity"], 3);
        assert_eq!(out[0]["id"], "p1");
    }
}
