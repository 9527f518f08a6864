//! Authentication service.
//!
//! Demo email/password authentication against the [`AccountDirectory`].
//! Every call waits the configured latency before answering, the way a
//! remote identity provider would.

mod error;

pub use error::AuthError;

use std::time::Duration;

use tracing::{info, instrument, warn};

use eclat_core::{Email, User};

use crate::models::AccountDirectory;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Borrows the account directory for the duration of one operation; the
/// caller persists the directory afterwards.
pub struct AuthService<'a> {
    directory: &'a mut AccountDirectory,
    latency: Duration,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(directory: &'a mut AccountDirectory, latency: Duration) -> Self {
        Self {
            directory,
            latency,
        }
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        self.simulate_latency().await;

        let Some(account) = self.directory.authenticate(email, password) else {
            warn!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        info!(user_id = %account.id, "Login succeeded");
        Ok(account.to_user())
    }

    /// Register a new account and return its session user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        self.simulate_latency().await;

        // Validate email
        let email = Email::parse(email)?;

        // Validate password
        validate_password(password)?;

        if self.directory.find_by_email(email.as_str()).is_some() {
            warn!("Registration rejected: email already registered");
            return Err(AuthError::UserAlreadyExists);
        }

        let account = self.directory.push(name, email, password);
        info!(user_id = %account.id, "Account registered");
        Ok(account.to_user())
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

/// Validate password meets requirements.
///
/// # Errors
///
/// Returns `AuthError::WeakPassword` if the password is too short.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
