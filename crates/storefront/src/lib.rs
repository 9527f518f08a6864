//! Éclat storefront library.
//!
//! Session state for the Éclat cosmetics storefront: the static catalog,
//! cart, favorites, order history, demo accounts and the checkout flow,
//! persisted through a pluggable [`db::StateRepository`].
//!
//! ```rust,ignore
//! let repo = FileRepository::open(&config.data_dir)?;
//! let mut state = AppState::load(config, repo)?;
//! state.add_product_by_id(&ProductId::new("p1"))?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;

pub use error::{AppError, Result};
pub use state::AppState;
