//! Integration tests for the Éclat storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p eclat-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to confirmed order, pricing included
//! - `session_persistence` - Rehydration through the file repository
//! - `admin_dashboard` - Order filters and dashboard figures
//!
//! Every test gets its own data directory under the system temp dir,
//! removed when the [`TestContext`] is dropped.

use std::path::{Path, PathBuf};

use eclat_storefront::AppState;
use eclat_storefront::config::StorefrontConfig;
use eclat_storefront::db::FileRepository;
use uuid::Uuid;

/// A scratch data directory and the configuration pointing at it.
pub struct TestContext {
    dir: PathBuf,
    config: StorefrontConfig,
}

impl TestContext {
    /// Fresh empty data directory with latency disabled.
    #[must_use]
    pub fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("eclat-it-{}", Uuid::new_v4()));
        let config = StorefrontConfig {
            data_dir: dir.clone(),
            ..StorefrontConfig::default()
        }
        .without_latency();
        Self { dir, config }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Load state from the data directory, as a new process would.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be opened or read.
    pub fn open(&self) -> eclat_storefront::Result<AppState<FileRepository>> {
        let repository = FileRepository::open(&self.dir)?;
        AppState::load(self.config.clone(), repository)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}
