//! Common test utilities and configuration.
//!
//! This module provides shared test infrastructure including:
//! - Test users (bcrypt cost 4 to keep the suite fast)
//! - Test app builder mirroring the server wiring
//! - Login helper returning the session cookie

#![allow(dead_code)]

use std::net::SocketAddr;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::LOCATION;
use actix_web::{test, web, App, Error};

use travel_agency_security::http::security::{
    IpAddressMatcher, InMemoryUserDetailsService, PasswordEncoder, Principal, SecurityTransform,
    SessionAuthenticator, MANAGER_ROLE,
};
use travel_agency_server::handlers;
use travel_agency_server::security_config;
use travel_agency_server::settings::SecurityProperties;

pub const ADMIN_IP: &str = "10.1.2.3";

pub const MANAGER: (&str, &str) = ("manager@agency.test", "manager-pass");
pub const CLERK: (&str, &str) = ("clerk@agency.test", "clerk-pass");

pub fn test_properties(admin_ip: &str) -> SecurityProperties {
    SecurityProperties {
        admin_ip: IpAddressMatcher::parse(admin_ip).unwrap(),
        bcrypt_cost: 4,
        bind_address: "127.0.0.1:0".to_string(),
    }
}

/// Users:
/// - manager@agency.test: MANAGER role
/// - clerk@agency.test: no roles
pub fn test_users(encoder: &impl PasswordEncoder) -> InMemoryUserDetailsService {
    InMemoryUserDetailsService::with_users(vec![
        Principal::new(MANAGER.0, encoder.encode(MANAGER.1)).roles(&[MANAGER_ROLE]),
        Principal::new(CLERK.0, encoder.encode(CLERK.1)),
    ])
}

pub fn peer(ip: &str) -> SocketAddr {
    SocketAddr::new(ip.parse().unwrap(), 40000)
}

/// Creates the test application with the site's security configuration.
pub async fn create_test_app(
    admin_ip: &str,
) -> impl Service<actix_http::Request, Response = ServiceResponse<impl MessageBody>, Error = Error>
{
    let props = test_properties(admin_ip);
    let encoder = security_config::password_encoder(&props);
    let users = test_users(&encoder);
    let form_login = security_config::form_login_service(users.clone(), &props);
    let session_config = form_login.session_config().clone();

    test::init_service(
        App::new()
            .wrap(SecurityTransform::new(
                SessionAuthenticator::new(session_config),
                security_config::authorizer(&props),
            ))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(web::Data::new(form_login))
            .app_data(web::Data::new(users))
            .app_data(web::Data::new(encoder))
            .configure(handlers::configure),
    )
    .await
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<&str> {
    resp.headers().get(LOCATION).and_then(|v| v.to_str().ok())
}

/// Posts the login form and returns the session cookie of a successful login.
pub async fn login<S, B>(app: &S, (email, password): (&str, &str)) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/login")
        .set_form([("email", email), ("password", password)])
        .to_request();

    let resp = test::call_service(app, req).await;
    assert_eq!(location(&resp), Some("/"), "login failed for {}", email);
    session_cookie(&resp).expect("login sets the session cookie")
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    let body = test::read_body(resp).await;
    String::from_utf8_lossy(&body).into_owned()
}
