//! Status enums for various entities.

use serde::{Deserialize, Serialize};

/// Order progress.
///
/// Orders are created `Processing`. The other states are only ever seen on
/// orders imported from elsewhere; nothing in the storefront advances them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [Self; 3] = [Self::Processing, Self::Shipped, Self::Delivered];

    /// Customer-facing label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Processing => "En cours",
            Self::Shipped => "Expédié",
            Self::Delivered => "Livré",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" | "En cours" => Ok(Self::Processing),
            "shipped" | "Expédié" => Ok(Self::Shipped),
            "delivered" | "Livré" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parses_back() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
            assert_eq!(status.label().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_default_is_processing() {
        assert_eq!(OrderStatus::default(), OrderStatus::Processing);
    }
}
