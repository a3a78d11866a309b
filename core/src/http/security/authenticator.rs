//! Username/password authentication against a credential lookup.
//!
//! # Spring Security Equivalent
//! `org.springframework.security.authentication.dao.DaoAuthenticationProvider`

use std::sync::Arc;

use actix_web::web;
use log::{error, info};

use crate::http::error::SecurityError;
use crate::http::security::crypto::PasswordEncoder;
use crate::http::security::user_details::UserDetailsService;
use crate::http::security::Principal;

/// Checks submitted credentials with a [`UserDetailsService`] and a [`PasswordEncoder`].
///
/// # Example
/// ```ignore
/// let provider = DaoAuthenticationProvider::new(
///     InMemoryUserDetailsService::with_users(users),
///     BCryptPasswordEncoder::new(),
/// );
/// let principal = provider.authenticate("ann@agency.test", "secret").await?;
/// ```
#[derive(Clone)]
pub struct DaoAuthenticationProvider {
    user_details_service: Arc<dyn UserDetailsService>,
    password_encoder: Arc<dyn PasswordEncoder>,
}

impl DaoAuthenticationProvider {
    pub fn new<S, E>(user_details_service: S, password_encoder: E) -> Self
    where
        S: UserDetailsService + 'static,
        E: PasswordEncoder + 'static,
    {
        DaoAuthenticationProvider {
            user_details_service: Arc::new(user_details_service),
            password_encoder: Arc::new(password_encoder),
        }
    }

    /// Returns the principal with its hash erased, or `InvalidCredentials`.
    ///
    /// Unknown user, wrong password and lookup failure all look the same to the caller.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Principal, SecurityError> {
        let principal = match self
            .user_details_service
            .load_user_by_username(username)
            .await
        {
            Ok(Some(principal)) => principal,
            Ok(None) => {
                info!("Authentication failed for '{}': unknown user", username);
                return Err(SecurityError::InvalidCredentials);
            }
            Err(e) => {
                error!("Credential lookup failed for '{}': {}", username, e);
                return Err(SecurityError::InvalidCredentials);
            }
        };

        // bcrypt runs on the blocking pool, off the worker thread
        let encoder = Arc::clone(&self.password_encoder);
        let raw_password = password.to_string();
        let encoded_password = principal.get_password_hash().to_string();
        let matched = web::block(move || encoder.matches(&raw_password, &encoded_password))
            .await
            .unwrap_or_else(|e| {
                error!("Password check for '{}' did not complete: {}", username, e);
                false
            });

        if !matched {
            info!("Authentication failed for '{}': bad credentials", username);
            return Err(SecurityError::InvalidCredentials);
        }

        Ok(principal.erase_credentials())
    }
}
