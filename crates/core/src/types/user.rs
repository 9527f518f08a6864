//! Storefront users.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// The active user: either a demo account holder or a guest placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub is_guest: bool,
}

impl User {
    /// Display name used for guest placeholders.
    pub const GUEST_NAME: &'static str = "Invité";
    /// Email used for guest placeholders.
    pub const GUEST_EMAIL: &'static str = "guest@example.com";

    /// Build a guest placeholder user with the given session suffix.
    #[must_use]
    pub fn guest(suffix: impl std::fmt::Display) -> Self {
        Self {
            id: UserId::new(format!("{}{suffix}", UserId::GUEST_PREFIX)),
            name: Self::GUEST_NAME.to_owned(),
            email: Self::GUEST_EMAIL.to_owned(),
            phone: None,
            address: None,
            is_guest: true,
        }
    }

    /// Merge a partial update into this user.
    pub fn apply(&mut self, update: &UserUpdate) {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &update.email {
            self.email.clone_from(email);
        }
        if let Some(phone) = &update.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(address) = &update.address {
            self.address = Some(address.clone());
        }
    }
}

/// A partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UserUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.address.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_user() {
        let guest = User::guest(1_718_000_000_000_i64);
        assert!(guest.is_guest);
        assert!(guest.id.is_guest());
        assert_eq!(guest.id.as_str(), "guest-1718000000000");
        assert_eq!(guest.name, "Invité");
    }

    #[test]
    fn test_apply_partial_update() {
        let mut user = User::guest(1);
        user.apply(&UserUpdate {
            phone: Some("77 123 45 67".to_owned()),
            ..UserUpdate::default()
        });
        assert_eq!(user.phone.as_deref(), Some("77 123 45 67"));
        assert_eq!(user.name, "Invité");
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(User::guest(7)).unwrap();
        assert_eq!(json["isGuest"], true);
        assert!(json.get("phone").is_none());
    }
}
