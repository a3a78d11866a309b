//! Admin routes (restricted to the configured client address by the middleware).
//!
//! No principal is required here, so handlers use `OptionalUser`.

use actix_web::{get, web, Responder};
use travel_agency_security::http::security::OptionalUser;

use super::{escape, html_page};

#[get("/admin")]
pub async fn admin_index(user: OptionalUser) -> impl Responder {
    render("", &user)
}

#[get("/admin/{tail:.*}")]
pub async fn admin_page(path: web::Path<String>, user: OptionalUser) -> impl Responder {
    render(&path.into_inner(), &user)
}

fn render(section: &str, user: &OptionalUser) -> actix_web::HttpResponse {
    let visitor = user
        .as_ref()
        .map_or("anonymous".to_string(), |p| escape(p.get_username()));

    html_page(
        "Admin",
        &format!(
            "<h1>Admin /{}</h1>\n<p>Visitor: {}</p>",
            escape(section),
            visitor
        ),
    )
}
