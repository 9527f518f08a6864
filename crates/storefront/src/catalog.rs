//! Static product catalog.
//!
//! The catalog ships with the crate as `data/catalog.json` and never changes
//! at runtime.

use eclat_core::{Category, Product, ProductId};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Read-only list of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Load the catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled JSON is malformed.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let products = serde_json::from_str(json)?;
        Ok(Self { products })
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products in `category`, in catalog order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| p.category == category)
    }

    /// Products carrying `tag` (case-insensitive).
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products.iter().filter(move |p| {
            p.tag
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case(tag))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.products().len(), 19);
    }

    #[test]
    fn test_ids_are_unique_and_prices_non_negative() {
        let catalog = Catalog::builtin().unwrap();
        let ids: HashSet<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.products().len());
        assert!(catalog.products().iter().all(|p| p.price >= Decimal::ZERO));
    }

    #[test]
    fn test_lookup_and_filters() {
        let catalog = Catalog::builtin().unwrap();
        let serum = catalog.get(&ProductId::new("p1")).unwrap();
        assert_eq!(serum.name, "Sérum Hydratant");
        assert_eq!(serum.price, Decimal::new(3990, 2));

        assert_eq!(catalog.by_category(Category::Parfums).count(), 5);
        assert_eq!(catalog.by_category(Category::Soins).count(), 1);
        assert_eq!(catalog.tagged("nouveau").count(), 2);
        assert!(catalog.get(&ProductId::new("zz")).is_none());
    }
}
