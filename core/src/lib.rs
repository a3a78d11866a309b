//! # Travel Agency Security
//!
//! Authentication and authorization for the travel agency web application,
//! built as Actix Web middleware.
//!
//! - [`http::security`] - principal model, route rules, middleware, form login
//! - [`http::error`] - error types

pub mod http;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::http::error::SecurityError;
    pub use crate::http::security::{
        AccessDecision, AuthenticatedUser, BCryptPasswordEncoder, DaoAuthenticationProvider,
        FormLoginConfig, FormLoginService, OptionalUser, PasswordEncoder, Principal,
        RequestMatcherAuthorizer, Requirement, SecurityTransform, SessionAuthenticator,
        UserDetailsService,
    };
}
