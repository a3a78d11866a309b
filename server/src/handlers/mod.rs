//! Route handlers organized by access level.
//!
//! Access is decided by the security middleware before any of these run;
//! the handlers only render pages.

pub mod admin;
pub mod bookings;
pub mod errors;
pub mod home;
pub mod management;
pub mod public;
pub mod resources;

use actix_web::{web, HttpResponse};

use crate::security_config::{FORBIDDEN_PAGE, LOGOUT_URL};

/// Registers every route of the site.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .service(public::login_page)
        .service(public::login_submit)
        .service(web::resource(LOGOUT_URL).to(public::logout))
        .service(public::register_page)
        .service(public::register_submit)
        .service(resources::stylesheet)
        .service(web::resource(FORBIDDEN_PAGE).to(errors::forbidden))
        // Authenticated routes
        .service(home::index)
        .service(bookings::bookings)
        // MANAGER routes
        .service(management::hotels)
        .service(management::hotel)
        .service(management::rooms)
        .service(management::management)
        // Admin network routes
        .service(admin::admin_index)
        .service(admin::admin_page);
}

pub(crate) fn html_page(title: &str, content: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>{title} - Travel Agency</title>
    <link rel="stylesheet" href="/resources/css/site.css">
</head>
<body>
{content}
</body>
</html>"#
        ))
}

/// Escapes text for inclusion in HTML.
pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("ann@agency.test"), "ann@agency.test");
    }
}
