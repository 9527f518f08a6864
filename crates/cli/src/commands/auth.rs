//! Session commands.

use eclat_core::UserUpdate;
use eclat_storefront::db::StateRepository;
use eclat_storefront::{AppError, AppState, Result};

/// Sign in with a demo account.
///
/// # Errors
///
/// Returns `AppError::Auth` for unknown credentials.
pub async fn login<R: StateRepository>(
    state: &mut AppState<R>,
    email: &str,
    password: &str,
) -> Result<()> {
    let user = state.login(email, password).await?;
    println!("Connexion réussie. Bienvenue, {} !", user.name);
    Ok(())
}

/// Create an account and sign in.
///
/// # Errors
///
/// Returns `AppError::Auth` for a malformed or taken email, or a short
/// password.
pub async fn register<R: StateRepository>(
    state: &mut AppState<R>,
    name: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    let user = state.register(name, email, password).await?;
    println!("Compte créé. Bienvenue, {} !", user.name);
    Ok(())
}

/// Start a guest session.
///
/// # Errors
///
/// Returns `AppError::Repository` if the session cannot be saved.
pub fn guest<R: StateRepository>(state: &mut AppState<R>) -> Result<()> {
    let guest = state.continue_as_guest()?;
    println!("Vous naviguez en tant qu'invité ({})", guest.id);
    Ok(())
}

/// End the session.
///
/// # Errors
///
/// Returns `AppError::Repository` if the session records cannot be removed.
pub fn logout<R: StateRepository>(state: &mut AppState<R>) -> Result<()> {
    state.logout()?;
    println!("Vous avez été déconnecté");
    Ok(())
}

pub fn whoami<R: StateRepository>(state: &AppState<R>) {
    let Some(user) = state.current_user() else {
        println!("Non connecté");
        return;
    };
    if !state.access().is_member() {
        println!("{} ({})", user.name, user.id);
        println!("Connectez-vous pour suivre vos commandes");
        return;
    }
    println!("{} <{}>", user.name, user.email);
    if let Some(phone) = &user.phone {
        println!("  Téléphone : {phone}");
    }
    if let Some(address) = &user.address {
        println!("  Adresse   : {address}");
    }
}

/// Update the current user's profile.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if no field is given and `AppError::Auth`
/// without a session.
pub fn profile<R: StateRepository>(state: &mut AppState<R>, update: &UserUpdate) -> Result<()> {
    if update.is_empty() {
        return Err(AppError::BadRequest(
            "Indiquez au moins un champ à modifier".to_owned(),
        ));
    }
    let user = state.update_profile(update)?;
    println!("Profil mis à jour pour {}", user.name);
    Ok(())
}
