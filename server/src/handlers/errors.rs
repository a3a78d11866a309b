//! Error pages.

use actix_web::HttpResponse;

use super::html_page;

/// Fixed forbidden page.
///
/// Requests the security middleware denies are forwarded here and leave with `403`;
/// a direct visit renders the same page with `200`.
pub async fn forbidden() -> HttpResponse {
    html_page(
        "Forbidden",
        r#"<h1>Access denied</h1>
<p>You are not allowed to view this page.</p>
<p><a href="/">Back to the home page</a></p>"#,
    )
}
