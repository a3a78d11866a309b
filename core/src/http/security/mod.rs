//! Security module providing authentication and authorization.
//!
//! # Spring Equivalent
//! `org.springframework.security` package
//!
//! # Module Structure
//!
//! - `principal` - Principal model and its session form
//! - `ant_matcher` - Ant-style URL pattern matching
//! - `ip_matcher` - Client address / CIDR matching
//! - `authorizer` - Ordered route rules and the access decision (RequestMatcherAuthorizer)
//! - `config` - Middleware seams (Authenticator, Authorizer)
//! - `middleware` - Security middleware (SecurityTransform)
//! - `session` - Principal storage in actix-session
//! - `extractor` - Actix Web extractors (AuthenticatedUser, OptionalUser)
//! - `crypto` - Password encoding (BCrypt)
//! - `user_details` - Credential lookup (UserDetailsService)
//! - `authenticator` - Username/password checking (DaoAuthenticationProvider)
//! - `form_login` - Login form processing and logout

pub use authenticator::DaoAuthenticationProvider;
pub use authorizer::{AccessDecision, RequestMatcherAuthorizer, Requirement, RouteRule};
pub use config::{Authenticator, Authorizer, Next};
pub use crypto::{BCryptPasswordEncoder, PasswordEncoder};
pub use extractor::{AuthenticatedUser, OptionalUser};
pub use form_login::{FormLoginConfig, FormLoginService, LoginForm};
pub use ip_matcher::IpAddressMatcher;
pub use middleware::SecurityTransform;
pub use principal::{Principal, SessionPrincipal, MANAGER_ROLE};
pub use session::{SessionAuthenticator, SessionConfig, SessionError};
pub use user_details::{InMemoryUserDetailsService, UserDetailsError, UserDetailsService};

mod config;
mod extractor;
mod principal;

pub mod ant_matcher;
pub mod authenticator;
pub mod authorizer;
pub mod crypto;
pub mod form_login;
pub mod ip_matcher;
pub mod middleware;
pub mod session;
pub mod user_details;
