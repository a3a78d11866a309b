//! Customer area (any authenticated user).

use actix_web::{get, Responder};
use travel_agency_security::http::security::AuthenticatedUser;

use super::{escape, html_page};

#[get("/bookings")]
pub async fn bookings(user: AuthenticatedUser) -> impl Responder {
    html_page(
        "Bookings",
        &format!(
            "<h1>Bookings</h1>\n<p>No bookings yet for {}.</p>",
            escape(user.get_username())
        ),
    )
}
