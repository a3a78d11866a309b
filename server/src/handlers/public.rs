//! Public routes (no authentication required).

use std::collections::HashMap;

use actix_session::Session;
use actix_web::http::header::LOCATION;
use actix_web::{get, post, web, HttpResponse, Responder};
use log::{error, info};
use travel_agency_security::http::security::{
    BCryptPasswordEncoder, FormLoginService, InMemoryUserDetailsService, PasswordEncoder,
    Principal, UserDetailsError,
};

use super::html_page;

/// Login page (GET). `?error` and `?logout` add a notice above the form.
#[get("/login")]
pub async fn login_page(
    query: web::Query<HashMap<String, String>>,
    service: web::Data<FormLoginService>,
) -> impl Responder {
    let config = service.config();

    let notice = if query.contains_key("error") {
        r#"<p class="error">Invalid email or password.</p>"#
    } else if query.contains_key("logout") {
        r#"<p class="info">You have been logged out.</p>"#
    } else {
        ""
    };

    html_page(
        "Login",
        &format!(
            r#"<h1>Login</h1>
{notice}
<form action="{action}" method="post">
    <input type="email" name="{username}" placeholder="Email" required>
    <input type="password" name="{password}" placeholder="Password" required>
    <button type="submit">Sign In</button>
</form>
<p><a href="/register">Create an account</a></p>"#,
            action = config.get_login_processing_url(),
            username = config.get_username_parameter(),
            password = config.get_password_parameter(),
        ),
    )
}

/// Login processing (POST).
#[post("/login")]
pub async fn login_submit(
    session: Session,
    form: web::Form<HashMap<String, String>>,
    service: web::Data<FormLoginService>,
) -> impl Responder {
    let form = service.config().read_form(&form);
    service.attempt_authentication(&session, &form).await
}

/// Logout, any method.
pub async fn logout(session: Session, service: web::Data<FormLoginService>) -> HttpResponse {
    service.logout(&session)
}

#[get("/register")]
pub async fn register_page(query: web::Query<HashMap<String, String>>) -> impl Responder {
    let notice = if query.contains_key("exists") {
        r#"<p class="error">An account with this email already exists.</p>"#
    } else if query.contains_key("error") {
        r#"<p class="error">Email and password are required.</p>"#
    } else {
        ""
    };

    html_page(
        "Register",
        &format!(
            r#"<h1>Create an account</h1>
{notice}
<form action="/register" method="post">
    <input type="email" name="email" placeholder="Email" required>
    <input type="password" name="password" placeholder="Password" required>
    <button type="submit">Register</button>
</form>"#
        ),
    )
}

/// Registers a customer account (no roles) and sends the visitor to the login page.
#[post("/register")]
pub async fn register_submit(
    form: web::Form<HashMap<String, String>>,
    users: web::Data<InMemoryUserDetailsService>,
    encoder: web::Data<BCryptPasswordEncoder>,
) -> impl Responder {
    let email = form.get("email").map(|s| s.trim()).unwrap_or_default();
    let password = form.get("password").map(String::as_str).unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return redirect("/register?error");
    }

    let encoder = encoder.into_inner();
    let password = password.to_string();
    // Hashing runs on the blocking pool
    let hash = match web::block(move || encoder.encode(&password)).await {
        Ok(hash) => hash,
        Err(e) => {
            error!("Could not hash password for '{}': {}", email, e);
            return redirect("/register?error");
        }
    };

    match users.create_user(Principal::new(email, hash)).await {
        Ok(()) => {
            info!("Registered '{}'", email);
            redirect("/login")
        }
        Err(UserDetailsError::AlreadyExists) => redirect("/register?exists"),
        Err(e) => {
            error!("Could not register '{}': {}", email, e);
            redirect("/register?error")
        }
    }
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, location.to_string()))
        .finish()
}
