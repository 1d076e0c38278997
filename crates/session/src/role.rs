use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr, VariantArray};

/// Closed set of roles. The url token is the lowercase variant name and
/// parsing is case-sensitive, `Farmer` or `ADMIN` are not roles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    IntoStaticStr,
    VariantArray,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Factory,
    Admin,
}

impl Role {
    pub fn from_token(token: &str) -> Option<Self> {
        token.parse().ok()
    }

    pub fn token(&self) -> &'static str {
        self.into()
    }

    /// Translation key of the display name, see `locales/`.
    pub fn label_key(&self) -> &'static str {
        match self {
            Role::Farmer => "role.farmer",
            Role::Factory => "role.factory",
            Role::Admin => "role.admin",
        }
    }

    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Farmer => "/farmer",
            Role::Factory => "/factory",
            Role::Admin => "/admin",
        }
    }

    /// Only factories may skip the login form with `action=direct`.
    pub fn allows_direct_login(&self) -> bool {
        matches!(self, Role::Factory)
    }

    /// Farmers sign in with LINE, never with a username and password.
    pub fn uses_line_login(&self) -> bool {
        matches!(self, Role::Farmer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip() {
        for role in Role::VARIANTS {
            assert_eq!(Role::from_token(role.token()), Some(*role));
        }
        assert_eq!(Role::Factory.token(), "factory");
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_tokens_are_case_sensitive() {
        assert_eq!(Role::from_token("Farmer"), None);
        assert_eq!(Role::from_token("ADMIN"), None);
        assert_eq!(Role::from_token("administrator"), None);
        assert_eq!(Role::from_token(""), None);
    }

    #[test]
    fn test_direct_login_policy() {
        assert!(Role::Factory.allows_direct_login());
        assert!(!Role::Admin.allows_direct_login());
        assert!(!Role::Farmer.allows_direct_login());
    }
}
