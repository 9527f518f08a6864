//! Session records.

use core::fmt;

use serde::{Deserialize, Serialize};

use eclat_core::User;

/// Demo session token stored alongside the signed-in user.
///
/// Tokens are opaque markers with no expiry; their only role is to
/// distinguish a member session from a guest one on rehydration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    const PREFIX: &'static str = "demo-token-";

    /// Build the demo token issued at `millis` since the Unix epoch.
    #[must_use]
    pub fn demo(millis: i64) -> Self {
        Self(format!("{}{millis}", Self::PREFIX))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the current session is allowed to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Signed-in account holder with a token.
    Member,
    /// Guest placeholder; may check out but sees a sign-in banner.
    Guest,
    /// No session; account pages redirect to login.
    Anonymous,
}

impl Access {
    /// Whether this session may go through checkout.
    #[must_use]
    pub const fn can_checkout(self) -> bool {
        matches!(self, Self::Member | Self::Guest)
    }

    /// Whether this session may open account pages.
    #[must_use]
    pub const fn is_member(self) -> bool {
        matches!(self, Self::Member)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Member => "member",
            Self::Guest => "guest",
            Self::Anonymous => "anonymous",
        })
    }
}

/// The active session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Guest(User),
    Member { user: User, token: SessionToken },
}

impl Session {
    /// Rebuild a session from persisted records.
    ///
    /// A user with a token is a member; otherwise a guest record makes a
    /// guest session. A user without a token is ignored.
    #[must_use]
    pub fn rehydrate(
        user: Option<User>,
        token: Option<SessionToken>,
        guest: Option<User>,
    ) -> Self {
        match (user, token, guest) {
            (Some(user), Some(token), _) => Self::Member { user, token },
            (_, _, Some(guest)) => Self::Guest(guest),
            _ => Self::Anonymous,
        }
    }

    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Anonymous => Access::Anonymous,
            Self::Guest(_) => Access::Guest,
            Self::Member { .. } => Access::Member,
        }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Guest(user) | Self::Member { user, .. } => Some(user),
        }
    }

    #[must_use]
    pub const fn token(&self) -> Option<&SessionToken> {
        match self {
            Self::Member { token, .. } => Some(token),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_token_format() {
        let token = SessionToken::demo(1_718_000_000_123);
        assert_eq!(token.as_str(), "demo-token-1718000000123");
        assert_eq!(
            serde_json::to_string(&token).unwrap_or_default(),
            "\"demo-token-1718000000123\""
        );
    }

    #[test]
    fn test_checkout_access() {
        assert!(Access::Member.can_checkout());
        assert!(Access::Guest.can_checkout());
        assert!(!Access::Anonymous.can_checkout());
        assert!(!Access::Guest.is_member());
    }

    #[test]
    fn test_rehydrate_precedence() {
        let member = User {
            id: "1".into(),
            name: "Sophie Martin".to_owned(),
            email: "sophie@example.com".to_owned(),
            phone: None,
            address: None,
            is_guest: false,
        };
        let guest = User::guest(1);
        let token = SessionToken::demo(1);

        let session = Session::rehydrate(
            Some(member.clone()),
            Some(token.clone()),
            Some(guest.clone()),
        );
        assert_eq!(session.access(), Access::Member);
        assert_eq!(session.user(), Some(&member));
        assert_eq!(session.token(), Some(&token));

        let session = Session::rehydrate(Some(member), None, Some(guest.clone()));
        assert_eq!(session, Session::Guest(guest));
        assert!(session.token().is_none());

        assert_eq!(Session::rehydrate(None, Some(token), None), Session::Anonymous);
    }
}
