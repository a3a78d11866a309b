//! Static resources.

use actix_web::{get, HttpResponse, Responder};

const SITE_CSS: &str = "\
body { font-family: Arial, sans-serif; max-width: 720px; margin: 40px auto; padding: 0 20px; }
form { display: flex; flex-direction: column; gap: 12px; max-width: 320px; }
input, button { padding: 8px; font-size: 15px; }
.error { color: #b00020; }
.info { color: #555; }
";

#[get("/resources/css/site.css")]
pub async fn stylesheet() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(SITE_CSS)
}
