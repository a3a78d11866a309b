//! Home route (authentication required).

use actix_web::{get, Responder};
use travel_agency_security::http::security::{AuthenticatedUser, MANAGER_ROLE};

use super::{escape, html_page};

/// Home page - shows the current user and the areas open to them.
#[get("/")]
pub async fn index(user: AuthenticatedUser) -> impl Responder {
    let manager_links = if user.has_role(MANAGER_ROLE) {
        r#"<li><a href="/hotels">Hotels</a></li>
    <li><a href="/rooms">Rooms</a></li>
    <li><a href="/management">Management</a></li>"#
    } else {
        ""
    };

    html_page(
        "Home",
        &format!(
            r#"<h1>Welcome, {name}!</h1>
<ul>
    <li><a href="/bookings">My bookings</a></li>
    {manager_links}
</ul>
<form action="/logout" method="post">
    <button type="submit">Logout</button>
</form>"#,
            name = escape(user.get_username()),
        ),
    )
}
