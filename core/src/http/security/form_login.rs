//! Form-based login and logout.
//!
//! # Spring Security Equivalent
//! `formLogin()` and `logout()` configuration.
//!
//! # Example
//! ```rust,ignore
//! let form_login = FormLoginConfig::new()
//!     .username_parameter("email")
//!     .password_parameter("password");
//!
//! let service = FormLoginService::new(provider, form_login, SessionConfig::new());
//!
//! async fn login_submit(
//!     session: Session,
//!     form: web::Form<HashMap<String, String>>,
//!     service: web::Data<FormLoginService>,
//! ) -> HttpResponse {
//!     let form = service.config().read_form(&form);
//!     service.attempt_authentication(&session, &form).await
//! }
//! ```

use std::collections::HashMap;

use actix_session::Session;
use actix_web::http::header::LOCATION;
use actix_web::HttpResponse;
use log::{error, info};

use crate::http::security::authenticator::DaoAuthenticationProvider;
use crate::http::security::session::{SessionAuthenticator, SessionConfig};

/// Form login configuration.
///
/// # Spring Security Equivalent
/// `FormLoginConfigurer` + `LogoutConfigurer`
#[derive(Debug, Clone)]
pub struct FormLoginConfig {
    /// Login page (GET)
    login_page: String,
    /// Where the form is submitted (POST)
    login_processing_url: String,
    username_parameter: String,
    password_parameter: String,
    default_success_url: String,
    failure_url: String,
    logout_url: String,
    logout_success_url: String,
}

impl Default for FormLoginConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FormLoginConfig {
    pub fn new() -> Self {
        Self {
            login_page: "/login".to_string(),
            login_processing_url: "/login".to_string(),
            username_parameter: "username".to_string(),
            password_parameter: "password".to_string(),
            default_success_url: "/".to_string(),
            failure_url: "/login?error".to_string(),
            logout_url: "/logout".to_string(),
            logout_success_url: "/login?logout".to_string(),
        }
    }

    /// # Spring Equivalent
    /// `formLogin().loginPage("/login")`
    pub fn login_page(mut self, url: &str) -> Self {
        self.login_page = url.to_string();
        self
    }

    /// # Spring Equivalent
    /// `formLogin().loginProcessingUrl("/login")`
    pub fn login_processing_url(mut self, url: &str) -> Self {
        self.login_processing_url = url.to_string();
        self
    }

    /// # Spring Equivalent
    /// `formLogin().usernameParameter("email")`
    pub fn username_parameter(mut self, param: &str) -> Self {
        self.username_parameter = param.to_string();
        self
    }

    /// # Spring Equivalent
    /// `formLogin().passwordParameter("password")`
    pub fn password_parameter(mut self, param: &str) -> Self {
        self.password_parameter = param.to_string();
        self
    }

    /// # Spring Equivalent
    /// `formLogin().defaultSuccessUrl("/")`
    pub fn default_success_url(mut self, url: &str) -> Self {
        self.default_success_url = url.to_string();
        self
    }

    /// # Spring Equivalent
    /// `formLogin().failureUrl("/login?error")`
    pub fn failure_url(mut self, url: &str) -> Self {
        self.failure_url = url.to_string();
        self
    }

    pub fn logout_url(mut self, url: &str) -> Self {
        self.logout_url = url.to_string();
        self
    }

    pub fn logout_success_url(mut self, url: &str) -> Self {
        self.logout_success_url = url.to_string();
        self
    }

    pub fn get_login_page(&self) -> &str {
        &self.login_page
    }

    pub fn get_login_processing_url(&self) -> &str {
        &self.login_processing_url
    }

    pub fn get_username_parameter(&self) -> &str {
        &self.username_parameter
    }

    pub fn get_password_parameter(&self) -> &str {
        &self.password_parameter
    }

    pub fn get_default_success_url(&self) -> &str {
        &self.default_success_url
    }

    pub fn get_failure_url(&self) -> &str {
        &self.failure_url
    }

    pub fn get_logout_url(&self) -> &str {
        &self.logout_url
    }

    pub fn get_logout_success_url(&self) -> &str {
        &self.logout_success_url
    }

    /// Paths reachable without a principal: the login page, its processing URL,
    /// the path of the failure URL, and the logout URL.
    ///
    /// # Spring Equivalent
    /// `formLogin().permitAll()` / `logout().permitAll()`
    pub fn permitted_paths(&self) -> Vec<&str> {
        let failure_path = self
            .failure_url
            .split_once('?')
            .map_or(self.failure_url.as_str(), |(path, _)| path);

        let mut paths = Vec::new();
        for path in [
            self.login_page.as_str(),
            self.login_processing_url.as_str(),
            failure_path,
            self.logout_url.as_str(),
        ] {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }

    /// Picks the credentials out of decoded form fields using the configured names.
    /// Missing fields read as empty strings.
    pub fn read_form(&self, fields: &HashMap<String, String>) -> LoginForm {
        let field = |name: &str| fields.get(name).cloned().unwrap_or_default();
        LoginForm {
            username: field(&self.username_parameter),
            password: field(&self.password_parameter),
        }
    }
}

/// Submitted credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login and logout endpoints backed by a credential provider and the session.
///
/// # Spring Security Equivalent
/// `UsernamePasswordAuthenticationFilter` + `LogoutFilter`
#[derive(Clone)]
pub struct FormLoginService {
    provider: DaoAuthenticationProvider,
    config: FormLoginConfig,
    session_config: SessionConfig,
}

impl FormLoginService {
    pub fn new(
        provider: DaoAuthenticationProvider,
        config: FormLoginConfig,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            provider,
            config,
            session_config,
        }
    }

    /// Redirects to the success URL with the principal in the session,
    /// or to the failure URL with the session untouched.
    pub async fn attempt_authentication(&self, session: &Session, form: &LoginForm) -> HttpResponse {
        let principal = match self
            .provider
            .authenticate(&form.username, &form.password)
            .await
        {
            Ok(principal) => principal,
            Err(_) => return redirect(&self.config.failure_url),
        };

        if let Err(e) = SessionAuthenticator::login(session, &principal, &self.session_config) {
            error!("Could not store principal '{}': {}", form.username, e);
            return redirect(&self.config.failure_url);
        }

        info!("Login succeeded for '{}'", principal.get_username());
        redirect(&self.config.default_success_url)
    }

    /// Clears the principal and redirects to the logout success URL.
    pub fn logout(&self, session: &Session) -> HttpResponse {
        SessionAuthenticator::logout(session, &self.session_config);
        redirect(&self.config.logout_success_url)
    }

    pub fn config(&self) -> &FormLoginConfig {
        &self.config
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.session_config
    }
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location.to_string()))
        .finish()
}
