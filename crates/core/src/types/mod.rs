//! Core types for the Éclat storefront.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart;
pub mod email;
pub mod favorites;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod shipping;
pub mod status;
pub mod user;

pub use cart::{Cart, CartLine};
pub use email::{Email, EmailError};
pub use favorites::Favorites;
pub use id::*;
pub use order::{Order, PriceBreakdown, ShippingDetails};
pub use price::{CurrencyCode, Price, XOF_PER_EUR, round_cents};
pub use product::{Category, Product};
pub use shipping::{Country, PaymentMethod, ShippingMethod};
pub use status::*;
pub use user::{User, UserUpdate};
