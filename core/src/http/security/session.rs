//! Session-backed principal storage.
//!
//! # Spring Security Equivalent
//! `HttpSessionSecurityContextRepository` with `SessionFixationProtectionStrategy`
//!
//! The session itself (cookie, storage, expiry) belongs to `actix-session`;
//! this module only reads and writes the principal entry.
//!
//! # Example
//! ```rust,ignore
//! let session_config = SessionConfig::new();
//!
//! App::new()
//!     .wrap(SecurityTransform::new(
//!         SessionAuthenticator::new(session_config.clone()),
//!         policy.clone(),
//!     ))
//!     .wrap(SessionMiddleware::new(CookieSessionStore::default(), key.clone()))
//! ```

use actix_session::{Session, SessionExt};
use actix_web::dev::ServiceRequest;
use log::warn;

use crate::http::security::config::Authenticator;
use crate::http::security::principal::SessionPrincipal;
use crate::http::security::Principal;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    principal_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            principal_key: "security_principal".to_string(),
        }
    }

    pub fn principal_key(mut self, key: &str) -> Self {
        self.principal_key = key.to_string();
        self
    }

    pub fn get_principal_key(&self) -> &str {
        &self.principal_key
    }
}

/// Session-related errors.
#[derive(Debug)]
pub enum SessionError {
    InsertError(String),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InsertError(e) => write!(f, "Session insert error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

/// Reads the principal from the actix session and stores it on login.
#[derive(Debug, Clone)]
pub struct SessionAuthenticator {
    config: SessionConfig,
}

impl SessionAuthenticator {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Stores the principal in the session under a fresh session id.
    /// Other attributes are migrated.
    ///
    /// # Spring Security Equivalent
    /// `sessionFixation().migrateSession()`
    pub fn login(
        session: &Session,
        principal: &Principal,
        config: &SessionConfig,
    ) -> Result<(), SessionError> {
        session.renew();
        session
            .insert(&config.principal_key, SessionPrincipal::from(principal))
            .map_err(|e| SessionError::InsertError(e.to_string()))
    }

    /// Removes the principal. Other session attributes survive.
    pub fn logout(session: &Session, config: &SessionConfig) {
        session.remove(&config.principal_key);
    }

    pub fn get_principal(session: &Session, config: &SessionConfig) -> Option<Principal> {
        match session.get::<SessionPrincipal>(&config.principal_key) {
            Ok(stored) => stored.map(Principal::from),
            Err(e) => {
                warn!("Discarding unreadable session principal: {}", e);
                None
            }
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Authenticator for SessionAuthenticator {
    fn authenticate(&self, req: &ServiceRequest) -> Option<Principal> {
        Self::get_principal(&req.get_session(), &self.config)
    }
}
