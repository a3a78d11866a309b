//! Principal model for authentication and authorization.
//!
//! # Spring Equivalent
//! `UserDetails` interface

use std::fmt;

use serde::{Deserialize, Serialize};

/// The single privileged role checked by the access policy.
pub const MANAGER_ROLE: &str = "MANAGER";

/// An identity with a stored password hash and a set of roles.
///
/// # Spring Equivalent
/// `UserDetails` / `User`
///
/// # Example
/// ```
/// use travel_agency_security::http::security::Principal;
///
/// let principal = Principal::new("manager@agency.test", "$2b$10$...")
///     .roles(&["MANAGER"]);
///
/// assert!(principal.has_role("MANAGER"));
/// assert!(!principal.has_role("manager"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    username: String,
    password_hash: String,
    roles: Vec<String>,
}

impl Principal {
    /// Creates a principal with a pre-encoded password hash and no roles.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Principal {
            username: username.into(),
            password_hash: password_hash.into(),
            roles: Vec::new(),
        }
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }

    /// Returns the stored hash. Empty for principals restored from a session.
    pub fn get_password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    /// Adds roles (builder pattern). Duplicates are ignored so roles behave as a set.
    pub fn roles<S: AsRef<str>>(mut self, roles: &[S]) -> Self {
        for role in roles {
            let role = role.as_ref();
            if !self.has_role(role) {
                self.roles.push(role.to_string());
            }
        }
        self
    }

    /// Case-sensitive exact match.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Drops the password hash, keeping identity and roles.
    pub fn erase_credentials(mut self) -> Self {
        self.password_hash.clear();
        self
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Principal {{ username: {}, roles: {:?} }}",
            self.username, self.roles
        )
    }
}

/// Serializable principal stored in the session.
///
/// Carries identity and roles only; the hash never leaves the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPrincipal {
    pub username: String,
    pub roles: Vec<String>,
}

impl From<&Principal> for SessionPrincipal {
    fn from(principal: &Principal) -> Self {
        SessionPrincipal {
            username: principal.get_username().to_string(),
            roles: principal.get_roles().to_vec(),
        }
    }
}

impl From<SessionPrincipal> for Principal {
    fn from(stored: SessionPrincipal) -> Self {
        Principal::new(stored.username, String::new()).roles(&stored.roles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_new() {
        let principal = Principal::new("alice@agency.test", "hash");
        assert_eq!(principal.get_username(), "alice@agency.test");
        assert_eq!(principal.get_password_hash(), "hash");
        assert!(principal.get_roles().is_empty());
    }

    #[test]
    fn test_roles_behave_as_set() {
        let principal = Principal::new("bob", "hash")
            .roles(&["MANAGER", "USER"])
            .roles(&["MANAGER"]);

        assert_eq!(principal.get_roles().len(), 2);
    }

    #[test]
    fn test_role_match_is_case_sensitive() {
        let principal = Principal::new("bob", "hash").roles(&[MANAGER_ROLE]);

        assert!(principal.has_role("MANAGER"));
        assert!(!principal.has_role("manager"));
        assert!(!principal.has_role("Manager"));
        assert!(!principal.has_role("ROLE_MANAGER"));
    }

    #[test]
    fn test_display_hides_hash() {
        let principal = Principal::new("carol", "s3cr3t-hash").roles(&["USER"]);
        let display = format!("{}", principal);

        assert!(display.contains("carol"));
        assert!(display.contains("USER"));
        assert!(!display.contains("s3cr3t-hash"));
    }

    #[test]
    fn test_session_principal_conversion() {
        let principal = Principal::new("dave", "hash").roles(&[MANAGER_ROLE]);
        let stored = SessionPrincipal::from(&principal);

        assert_eq!(stored.username, "dave");
        assert_eq!(stored.roles, vec!["MANAGER".to_string()]);

        let restored: Principal = stored.into();
        assert_eq!(restored.get_username(), "dave");
        assert!(restored.has_role(MANAGER_ROLE));
        assert_eq!(restored.get_password_hash(), "");
    }

    #[test]
    fn test_session_principal_serialization() {
        let stored = SessionPrincipal::from(&Principal::new("erin", "hash").roles(&["USER"]));

        let json = serde_json::to_string(&stored).unwrap();
        assert!(json.contains("erin"));
        assert!(!json.contains("hash"));

        let back: SessionPrincipal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stored);
    }

    #[test]
    fn test_erase_credentials() {
        let principal = Principal::new("frank", "hash").roles(&["USER"]).erase_credentials();
        assert_eq!(principal.get_password_hash(), "");
        assert!(principal.has_role("USER"));
    }
}
