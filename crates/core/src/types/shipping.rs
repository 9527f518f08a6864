//! Delivery destinations, shipping methods and payment methods.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Supported delivery countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    #[default]
    Senegal,
    Mali,
    Guinea,
}

impl Country {
    pub const ALL: [Self; 3] = [Self::Senegal, Self::Mali, Self::Guinea];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Senegal => "senegal",
            Self::Mali => "mali",
            Self::Guinea => "guinea",
        }
    }

    /// Display name as shown to customers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Senegal => "Sénégal",
            Self::Mali => "Mali",
            Self::Guinea => "Guinée",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "senegal" | "sénégal" | "sn" => Ok(Self::Senegal),
            "mali" | "ml" => Ok(Self::Mali),
            "guinea" | "guinee" | "guinée" | "gn" => Ok(Self::Guinea),
            _ => Err(format!("unsupported country: {s}")),
        }
    }
}

/// Shipping speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
}

impl ShippingMethod {
    /// Days until delivery for a destination.
    #[must_use]
    pub const fn delivery_days(self, country: Country) -> u32 {
        match (self, country) {
            (Self::Express, Country::Senegal) => 1,
            (Self::Express, _) | (Self::Standard, Country::Senegal) => 3,
            (Self::Standard, _) => 7,
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => f.write_str("standard"),
            Self::Express => f.write_str("express"),
        }
    }
}

impl std::str::FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            _ => Err(format!("invalid shipping method: {s}")),
        }
    }
}

/// How the customer pays. No provider is ever contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Wave,
    OrangeMoney,
    CashOnDelivery,
}

impl PaymentMethod {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Card => "Carte bancaire",
            Self::Wave => "Wave",
            Self::OrangeMoney => "Orange Money",
            Self::CashOnDelivery => "Paiement à la livraison",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "wave" => Ok(Self::Wave),
            "orange" | "orange_money" | "orange-money" => Ok(Self::OrangeMoney),
            "cash" | "cash_on_delivery" => Ok(Self::CashOnDelivery),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
