//! Demo account directory.
//!
//! Accounts are stored in clear text: this is a demo login with no
//! password hashing and no session expiry.

use serde::{Deserialize, Serialize};

use eclat_core::{Email, User, UserId, UserUpdate};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Account {
    /// The session user for this account.
    #[must_use]
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            is_guest: false,
        }
    }
}

/// Ordered list of accounts, unique by email (case-insensitive).
///
/// Emails are validated with [`Email::parse`] before they enter the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
}

impl AccountDirectory {
    /// Directory holding only the demo account.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            accounts: vec![Account {
                id: UserId::new("1"),
                name: "Sophie Martin".to_owned(),
                email: "sophie@example.com".to_owned(),
                password: "password123".to_owned(),
                phone: Some("06 12 34 56 78".to_owned()),
                address: Some("123 Avenue des Champs-Élysées, 75008 Paris, France".to_owned()),
            }],
        }
    }

    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Find the account registered under `email`, ignoring case.
    ///
    /// An address that does not parse matches nothing.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&Account> {
        let email = Email::parse(email).ok()?;
        self.accounts.iter().find(|a| email.matches(&a.email))
    }

    /// Whether `email` belongs to an account other than `id`.
    #[must_use]
    pub fn email_taken_by_other(&self, email: &str, id: &UserId) -> bool {
        self.find_by_email(email).is_some_and(|a| &a.id != id)
    }

    /// Find the account whose email and password both match.
    ///
    /// Email comparison ignores case; password comparison is exact.
    #[must_use]
    pub fn authenticate(&self, email: &str, password: &str) -> Option<&Account> {
        self.find_by_email(email).filter(|a| a.password == password)
    }

    /// Id for the next registration: directory length plus one.
    #[must_use]
    pub fn next_id(&self) -> UserId {
        UserId::new((self.accounts.len() + 1).to_string())
    }

    /// Append a new account and return a copy of it.
    ///
    /// Callers check for an existing email first.
    pub fn push(&mut self, name: &str, email: Email, password: &str) -> Account {
        let account = Account {
            id: self.next_id(),
            name: name.trim().to_owned(),
            email: email.into_inner(),
            password: password.to_owned(),
            phone: None,
            address: None,
        };
        self.accounts.push(account.clone());
        account
    }

    /// Mirror a profile update into the account with `id`.
    ///
    /// An email that does not parse is left unchanged on the account.
    /// Returns whether an account was found.
    pub fn update(&mut self, id: &UserId, update: &UserUpdate) -> bool {
        let Some(account) = self.accounts.iter_mut().find(|a| &a.id == id) else {
            return false;
        };
        if let Some(name) = &update.name {
            account.name.clone_from(name);
        }
        if let Some(email) = update.email.as_deref().and_then(|e| Email::parse(e).ok()) {
            account.email = email.into_inner();
        }
        if let Some(phone) = &update.phone {
            account.phone = Some(phone.clone());
        }
        if let Some(address) = &update.address {
            account.address = Some(address.clone());
        }
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_demo_account() {
        let directory = AccountDirectory::seeded();
        assert_eq!(directory.len(), 1);

        let sophie = directory
            .authenticate("SOPHIE@example.com", "password123")
            .unwrap();
        assert_eq!(sophie.name, "Sophie Martin");

        let user = sophie.to_user();
        assert_eq!(user.id.as_str(), "1");
        assert!(!user.is_guest);
    }

    #[test]
    fn test_password_is_exact() {
        let directory = AccountDirectory::seeded();
        assert!(directory.authenticate("sophie@example.com", "Password123").is_none());
        assert!(directory.authenticate("nobody@example.com", "password123").is_none());
    }

    #[test]
    fn test_push_assigns_next_id() {
        let mut directory = AccountDirectory::seeded();
        let email = Email::parse("awa@orange.sn").unwrap();
        let account = directory.push(" Awa Diop ", email, "teranga2024");
        assert_eq!(account.id.as_str(), "2");
        assert_eq!(account.name, "Awa Diop");
        assert_eq!(directory.next_id().as_str(), "3");
    }

    #[test]
    fn test_email_taken_by_other() {
        let mut directory = AccountDirectory::seeded();
        let awa = directory.push("Awa Diop", Email::parse("awa@orange.sn").unwrap(), "teranga2024");
        let sophie = UserId::new("1");

        assert!(directory.email_taken_by_other(" AWA@orange.sn", &sophie));
        assert!(!directory.email_taken_by_other("awa@orange.sn", &awa.id));
        assert!(!directory.email_taken_by_other("fatou@free.sn", &sophie));
        assert!(directory.find_by_email("not-an-email").is_none());
    }

    #[test]
    fn test_update_mirrors_profile() {
        let mut directory = AccountDirectory::seeded();
        let update = UserUpdate {
            phone: Some("77 000 00 00".to_owned()),
            email: Some("not-an-email".to_owned()),
            ..UserUpdate::default()
        };
        assert!(directory.update(&UserId::new("1"), &update));
        let sophie = directory.find_by_email("sophie@example.com").unwrap();
        assert_eq!(sophie.phone.as_deref(), Some("77 000 00 00"));

        assert!(!directory.update(&UserId::new("42"), &update));
    }

    #[test]
    fn test_serializes_as_array() {
        let json = serde_json::to_string(&AccountDirectory::seeded()).unwrap();
        assert!(json.starts_with('['));
        let back: AccountDirectory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, AccountDirectory::seeded());
    }
}
