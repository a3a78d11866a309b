//! Back-office routes (MANAGER role, enforced by the middleware).

use actix_web::{get, web, Responder};
use travel_agency_security::http::security::AuthenticatedUser;

use super::{escape, html_page};

#[get("/hotels")]
pub async fn hotels(user: AuthenticatedUser) -> impl Responder {
    html_page(
        "Hotels",
        &format!(
            "<h1>Hotels</h1>\n<p>Managed by {}.</p>",
            escape(user.get_username())
        ),
    )
}

#[get("/hotels/{id}")]
pub async fn hotel(path: web::Path<u32>) -> impl Responder {
    html_page("Hotel", &format!("<h1>Hotel #{}</h1>", path.into_inner()))
}

#[get("/rooms")]
pub async fn rooms() -> impl Responder {
    html_page("Rooms", "<h1>Rooms</h1>")
}

#[get("/management")]
pub async fn management(user: AuthenticatedUser) -> impl Responder {
    html_page(
        "Management",
        &format!(
            "<h1>Management</h1>\n<p>Signed in as {}.</p>",
            escape(user.get_username())
        ),
    )
}
