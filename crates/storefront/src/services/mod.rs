//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Demo email/password authentication
//! - `checkout` - Checkout state machine and order snapshots
//! - `pricing` - Discount, delivery, gift wrapping and VAT computation
//! - `admin` - Order filtering and dashboard figures

pub mod admin;
pub mod auth;
pub mod checkout;
pub mod pricing;
