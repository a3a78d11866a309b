//! Travel agency web application.
//!
//! # Run
//! ```bash
//! USER_IP_ADDRESS=127.0.0.1 cargo run -p travel-agency-server
//! ```
//!
//! `user.ip_address` may also come from `.env` or `security.properties`.
//! Startup fails when it is missing.

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use log::{error, info};

use travel_agency_security::http::security::{
    InMemoryUserDetailsService, PasswordEncoder, Principal, SecurityTransform,
    SessionAuthenticator, MANAGER_ROLE,
};
use travel_agency_server::handlers;
use travel_agency_server::security_config;
use travel_agency_server::settings::{Environment, SecurityProperties};

/// Demo accounts.
///
/// # Spring Security Equivalent
/// ```java
/// @Bean
/// public UserDetailsService userDetailsService(PasswordEncoder encoder) {
///     return new InMemoryUserDetailsManager(
///         User.withUsername("manager@agency.test").password(encoder.encode("manager")).roles("MANAGER").build(),
///         User.withUsername("clerk@agency.test").password(encoder.encode("clerk")).build()
///     );
/// }
/// ```
fn demo_users(encoder: &impl PasswordEncoder) -> InMemoryUserDetailsService {
    InMemoryUserDetailsService::with_users(vec![
        Principal::new("manager@agency.test", encoder.encode("manager")).roles(&[MANAGER_ROLE]),
        Principal::new("clerk@agency.test", encoder.encode("clerk")),
    ])
}

fn load_properties() -> Result<SecurityProperties, String> {
    let env = Environment::standard().map_err(|e| format!("cannot read properties: {}", e))?;
    SecurityProperties::from_environment(&env).map_err(|e| e.to_string())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let props = match load_properties() {
        Ok(props) => props,
        Err(e) => {
            error!("Startup aborted: {}", e);
            std::process::exit(1);
        }
    };

    let encoder = security_config::password_encoder(&props);
    let users = demo_users(&encoder);
    let form_login = web::Data::new(security_config::form_login_service(users.clone(), &props));
    let users = web::Data::new(users);
    let encoder = web::Data::new(encoder);

    let authorizer = security_config::authorizer(&props);
    let session_config = form_login.session_config().clone();
    // Cookie signing key; sessions do not survive a restart
    let secret_key = Key::generate();

    info!("Listening on http://{}", props.bind_address);
    info!("Demo accounts: manager@agency.test/manager (MANAGER), clerk@agency.test/clerk");

    HttpServer::new(move || {
        // CSRF protection is disabled for this application: no token filter is installed.
        App::new()
            .wrap(SecurityTransform::new(
                SessionAuthenticator::new(session_config.clone()),
                authorizer.clone(),
            ))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .app_data(form_login.clone())
            .app_data(users.clone())
            .app_data(encoder.clone())
            .configure(handlers::configure)
    })
    .bind(&props.bind_address)?
    .run()
    .await
}
