//! Password encoding.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.crypto.password.PasswordEncoder`

use log::warn;

/// Trait for encoding and verifying passwords.
///
/// # Spring Security Equivalent
/// `PasswordEncoder` interface
pub trait PasswordEncoder: Send + Sync {
    /// Encode the raw password with a fresh salt.
    fn encode(&self, raw_password: &str) -> String;

    /// Verify a raw password against an encoded password. Never fails: a malformed
    /// hash simply does not match.
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;
}

/// BCrypt password encoder.
///
/// # Spring Security Equivalent
/// `BCryptPasswordEncoder`
///
/// # Example
/// ```
/// use travel_agency_security::http::security::crypto::{BCryptPasswordEncoder, PasswordEncoder};
///
/// let encoder = BCryptPasswordEncoder::with_cost(4);
/// let hash = encoder.encode("secret_password");
///
/// assert!(encoder.matches("secret_password", &hash));
/// assert!(!encoder.matches("wrong_password", &hash));
/// ```
#[derive(Clone, Debug)]
pub struct BCryptPasswordEncoder {
    cost: u32,
}

impl BCryptPasswordEncoder {
    pub const DEFAULT_COST: u32 = 10;

    /// Creates an encoder with the default cost (10).
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Creates an encoder with a custom cost, clamped to 4..=31.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    pub fn get_cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BCryptPasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for BCryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> String {
        // Only fails for costs outside 4..=31, which the constructors rule out.
        bcrypt::hash(raw_password, self.cost).expect("bcrypt cost is always in range")
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        if encoded_password.is_empty() {
            warn!("Empty encoded password");
            return false;
        }
        match bcrypt::verify(raw_password, encoded_password) {
            Ok(matched) => matched,
            Err(_) => {
                warn!("Encoded password does not look like BCrypt");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_encoder() {
        let encoder = BCryptPasswordEncoder::with_cost(4);
        let hash = encoder.encode("test_password_123");

        assert_ne!(hash, "test_password_123");
        assert!(hash.starts_with("$2"));
        assert!(encoder.matches("test_password_123", &hash));
        assert!(!encoder.matches("wrong_password", &hash));
    }

    #[test]
    fn test_salted() {
        let encoder = BCryptPasswordEncoder::with_cost(4);
        assert_ne!(encoder.encode("same"), encoder.encode("same"));
    }

    #[test]
    fn test_malformed_hash_never_matches() {
        let encoder = BCryptPasswordEncoder::with_cost(4);
        assert!(!encoder.matches("plain", "plain"));
        assert!(!encoder.matches("", ""));
        assert!(!encoder.matches("x", "$2b$xx$garbage"));
    }

    #[test]
    fn test_cost_clamped() {
        assert_eq!(BCryptPasswordEncoder::with_cost(1).get_cost(), 4);
        assert_eq!(BCryptPasswordEncoder::with_cost(40).get_cost(), 31);
        assert_eq!(BCryptPasswordEncoder::new().get_cost(), 10);
    }
}
