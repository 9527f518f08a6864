//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for every storefront operation. Front
//! ends show [`AppError::user_message`] to the user and call
//! [`AppError::report`] so server-side failures reach Sentry.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error is a fault of the system rather than of the input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Repository(_)
                | Self::Config(_)
                | Self::Internal(_)
                | Self::Auth(AuthError::Repository(_))
                | Self::Checkout(CheckoutError::Repository(_))
        )
    }

    /// Capture internal errors to Sentry and log them.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected operation");
        }
    }

    /// Short notification text for the user.
    ///
    /// Internal error details are never exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_internal() {
            return "Une erreur interne est survenue".to_string();
        }
        match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Email ou mot de passe incorrect".to_string(),
                AuthError::UserAlreadyExists => "Cet email est déjà utilisé".to_string(),
                AuthError::WeakPassword(_) => {
                    "Le mot de passe doit contenir au moins 8 caractères".to_string()
                }
                AuthError::InvalidEmail(_) => "Adresse email invalide".to_string(),
                AuthError::NotAuthenticated => {
                    "Veuillez vous connecter pour accéder à cette page".to_string()
                }
                AuthError::Repository(_) => "Une erreur interne est survenue".to_string(),
            },
            Self::Checkout(err) => match err {
                CheckoutError::EmptyCart => "Votre panier est vide".to_string(),
                CheckoutError::MissingShippingDetails => {
                    "Veuillez remplir tous les champs obligatoires".to_string()
                }
                CheckoutError::InvalidPromoCode(_) => "Code promo invalide".to_string(),
                CheckoutError::InvalidTransition { .. } => {
                    "Cette étape n'est pas disponible".to_string()
                }
                CheckoutError::AccessDenied => {
                    "Connectez-vous ou continuez en tant qu'invité pour commander".to_string()
                }
                CheckoutError::Repository(_) => "Une erreur interne est survenue".to_string(),
            },
            Self::NotFound(what) => format!("Introuvable : {what}"),
            Self::BadRequest(msg) => msg.clone(),
            Self::Repository(_) | Self::Config(_) | Self::Internal(_) => {
                "Une erreur interne est survenue".to_string()
            }
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added product", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product p42".to_string());
        assert_eq!(err.to_string(), "Not found: product p42");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let io = std::io::Error::other("disk full");
        let err = AppError::from(RepositoryError::Io(io));
        assert!(err.is_internal());
        assert!(!err.user_message().contains("disk"));

        let err = AppError::Internal("lock poisoned".to_string());
        assert_eq!(err.user_message(), "Une erreur interne est survenue");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::from(AuthError::InvalidCredentials).user_message(),
            "Email ou mot de passe incorrect"
        );
        assert_eq!(
            AppError::from(CheckoutError::InvalidPromoCode("X".to_string())).user_message(),
            "Code promo invalide"
        );
        assert_eq!(
            AppError::from(CheckoutError::EmptyCart).user_message(),
            "Votre panier est vide"
        );
        assert!(!AppError::from(CheckoutError::EmptyCart).is_internal());
    }

    #[test]
    fn test_report_without_sentry_client() {
        // Sentry calls are no-ops until a client is bound.
        AppError::Internal("test".to_string()).report();
        AppError::BadRequest("test".to_string()).report();
        add_breadcrumb("test", "breadcrumb", Some(&[("k", "v")]));
        set_sentry_user(&"1", Some("sophie@example.com"));
        clear_sentry_user();
    }
}
