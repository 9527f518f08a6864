//! Domain models for the storefront.
//!
//! These types back the demo authentication: the account directory and the
//! session records persisted alongside the current user.

pub mod account;
pub mod session;

pub use account::{Account, AccountDirectory};
pub use session::{Access, Session, SessionToken};
