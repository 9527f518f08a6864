//! Persistence for storefront state.
//!
//! # Storage layout
//!
//! State is kept as JSON documents under a small, fixed set of keys
//! ([`StorageKey`]). Every state change overwrites the whole document for
//! the affected key; there are no transactions and the last writer wins.
//!
//! ## Keys
//!
//! - `cart` - Cart lines (product fields plus quantity)
//! - `favorites` - Favorite products
//! - `orders` - Order history, newest first
//! - `user` - Signed-in account holder
//! - `token` - Demo session token for the signed-in user
//! - `guestUser` - Guest placeholder user
//! - `accounts` - Demo account directory (seeded with the demo user)
//!
//! # Implementations
//!
//! - [`MemoryRepository`] - Process-local map, used by tests
//! - [`FileRepository`] - One `<key>.json` file per key in a data directory

mod file;
mod memory;

pub use file::FileRepository;
pub use memory::MemoryRepository;

use core::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Keys under which storefront state is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Cart,
    Favorites,
    Orders,
    User,
    Token,
    GuestUser,
    Accounts,
}

impl StorageKey {
    pub const ALL: [Self; 7] = [
        Self::Cart,
        Self::Favorites,
        Self::Orders,
        Self::User,
        Self::Token,
        Self::GuestUser,
        Self::Accounts,
    ];

    /// The key's stored name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Favorites => "favorites",
            Self::Orders => "orders",
            Self::User => "user",
            Self::Token => "token",
            Self::GuestUser => "guestUser",
            Self::Accounts => "accounts",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Reading or writing the backing store failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document is not valid JSON for its key.
    #[error("data corruption under key `{key}`: {source}")]
    DataCorruption {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },
}

/// Key/value storage for storefront state.
///
/// Implementations store opaque strings; the provided [`load`](Self::load)
/// and [`save`](Self::save) methods handle JSON encoding.
///
/// # Contract
///
/// - `get` returns exactly what the last successful `put` stored for the
///   key, or `None` if the key was never written or has been deleted.
/// - `put` replaces the whole value.
/// - `delete` of a missing key succeeds.
pub trait StateRepository {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the backing store cannot be read.
    fn get(&self, key: StorageKey) -> Result<Option<String>, RepositoryError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the backing store cannot be written.
    fn put(&self, key: StorageKey, value: &str) -> Result<(), RepositoryError>;

    /// Remove the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if the backing store cannot be written.
    fn delete(&self, key: StorageKey) -> Result<(), RepositoryError>;

    /// Read and decode the JSON document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored document does
    /// not decode as `T`, or any error from [`get`](Self::get).
    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, RepositoryError>
    where
        Self: Sized,
    {
        self.get(key)?
            .map(|raw| {
                serde_json::from_str(&raw)
                    .map_err(|source| RepositoryError::DataCorruption { key, source })
            })
            .transpose()
    }

    /// Encode `value` as JSON and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if encoding fails, or any
    /// error from [`put`](Self::put).
    fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), RepositoryError>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.put(key, &raw)
    }
}
