//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ECLAT_DATA_DIR` - Directory for persisted state (default: `.eclat`)
//! - `ECLAT_AUTH_LATENCY_MS` - Simulated login/register delay (default: 1000)
//! - `ECLAT_CHECKOUT_LATENCY_MS` - Simulated order submission delay (default: 2000)
//! - `ECLAT_PROMO_CODE` - Recognized promo code (default: `PROMO20`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".eclat";
const DEFAULT_AUTH_LATENCY_MS: &str = "1000";
const DEFAULT_CHECKOUT_LATENCY_MS: &str = "2000";
const DEFAULT_PROMO_CODE: &str = "PROMO20";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed repository
    pub data_dir: PathBuf,
    /// Delay applied to login and registration
    pub auth_latency: Duration,
    /// Delay applied to order placement
    pub checkout_latency: Duration,
    /// The single promo code granting the checkout discount
    pub promo_code: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            auth_latency: Duration::from_millis(1000),
            checkout_latency: Duration::from_millis(2000),
            promo_code: DEFAULT_PROMO_CODE.to_owned(),
            sentry_dsn: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let or_default =
            |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_owned());

        let data_dir = PathBuf::from(or_default("ECLAT_DATA_DIR", DEFAULT_DATA_DIR));
        let auth_latency = parse_millis(
            "ECLAT_AUTH_LATENCY_MS",
            &or_default("ECLAT_AUTH_LATENCY_MS", DEFAULT_AUTH_LATENCY_MS),
        )?;
        let checkout_latency = parse_millis(
            "ECLAT_CHECKOUT_LATENCY_MS",
            &or_default("ECLAT_CHECKOUT_LATENCY_MS", DEFAULT_CHECKOUT_LATENCY_MS),
        )?;

        let promo_code = or_default("ECLAT_PROMO_CODE", DEFAULT_PROMO_CODE);
        if promo_code.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ECLAT_PROMO_CODE".to_string(),
                "must not be blank".to_string(),
            ));
        }

        let sentry_dsn = get("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty());

        Ok(Self {
            data_dir,
            auth_latency,
            checkout_latency,
            promo_code,
            sentry_dsn,
        })
    }

    /// Disable all simulated latency.
    #[must_use]
    pub fn without_latency(mut self) -> Self {
        self.auth_latency = Duration::ZERO;
        self.checkout_latency = Duration::ZERO;
        self
    }
}

/// Parse a millisecond count.
fn parse_millis(key: &str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
