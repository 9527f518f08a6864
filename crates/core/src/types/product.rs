//! Catalog products.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product.
///
/// Products are immutable once defined. Carts and favorites hold full copies
/// so that they can be persisted and displayed without the catalog at hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in euros.
    pub price: Decimal,
    /// Image URI.
    pub image: String,
    pub category: Category,
    /// Merchandising badge such as "NOUVEAU" or "BEST-SELLER".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// Product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Face care.
    Visage,
    /// Makeup.
    Maquillage,
    /// Body care.
    Soins,
    /// Fragrances.
    Parfums,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Visage, Self::Maquillage, Self::Soins, Self::Parfums];

    /// The category's slug.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visage => "visage",
            Self::Maquillage => "maquillage",
            Self::Soins => "soins",
            Self::Parfums => "parfums",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid category: {s}"))
    }
}
