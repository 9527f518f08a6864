//! Éclat Core - Shared domain types.
//!
//! This crate provides the types used across all Éclat components:
//! - `storefront` - Catalog, cart, favorites, checkout and session state
//! - `cli` - Command-line front end over a file-backed storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations on them - no I/O,
//! no persistence, no clocks. Anything that needs the current time takes it
//! as an argument.
//!
//! # Modules
//!
//! - [`types`] - Ids, money, emails, products, carts, favorites, orders, users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
