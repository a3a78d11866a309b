//! Credential lookup collaborator.
//!
//! # Spring Security Equivalent
//! `UserDetailsService`
//!
//! The application supplies the real implementation (database, directory, ...).
//! [`InMemoryUserDetailsService`] backs the demo server and the tests.
//!
//! # Example
//! ```rust,ignore
//! use travel_agency_security::http::security::user_details::{UserDetailsService, UserDetailsError};
//! use async_trait::async_trait;
//!
//! struct CustomerRepository { /* pool */ }
//!
//! #[async_trait]
//! impl UserDetailsService for CustomerRepository {
//!     async fn load_user_by_username(&self, email: &str) -> Result<Option<Principal>, UserDetailsError> {
//!         // SELECT email, password_hash, roles FROM users WHERE email = $1
//!         Ok(None)
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::http::security::Principal;

/// Errors raised by a credential lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserDetailsError {
    /// Principal already registered
    AlreadyExists,
    /// Backing store failure
    StorageError(String),
}

impl std::fmt::Display for UserDetailsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserDetailsError::AlreadyExists => write!(f, "User already exists"),
            UserDetailsError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for UserDetailsError {}

/// Loads a principal (stored hash and roles) by username.
#[async_trait]
pub trait UserDetailsService: Send + Sync {
    /// `Ok(None)` when no such user exists.
    async fn load_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Principal>, UserDetailsError>;
}

#[async_trait]
impl<S> UserDetailsService for Arc<S>
where
    S: UserDetailsService + ?Sized,
{
    async fn load_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Principal>, UserDetailsError> {
        (**self).load_user_by_username(username).await
    }
}

/// In-memory credential store keyed by username.
#[derive(Clone, Default)]
pub struct InMemoryUserDetailsService {
    users: Arc<RwLock<HashMap<String, Principal>>>,
}

impl InMemoryUserDetailsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a fixed list; later duplicates replace earlier ones.
    pub fn with_users(users: Vec<Principal>) -> Self {
        let users = users
            .into_iter()
            .map(|u| (u.get_username().to_string(), u))
            .collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Registers a new principal. Usernames are unique.
    pub async fn create_user(&self, principal: Principal) -> Result<(), UserDetailsError> {
        let mut users = self.users.write().await;
        let username = principal.get_username().to_string();
        if users.contains_key(&username) {
            return Err(UserDetailsError::AlreadyExists);
        }
        users.insert(username, principal);
        Ok(())
    }
}

#[async_trait]
impl UserDetailsService for InMemoryUserDetailsService {
    async fn load_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Principal>, UserDetailsError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }
}
