use actix_web::{HttpResponse, get};
use serde_json::json;

#[get("/about/")]
pub async fn about() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "title": "About the project",
        "text": "Blogicum is a small blogging platform: scheduled posts, \
                 categories, locations and comments."
    }))
}

#[get("/rules/")]
pub async fn rules() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "title": "Our rules",
        "text": "Be kind. Stay on topic. Authors own their words."
    }))
}

/// Fallback for unmatched routes, so misses render the same error shape
/// as a failed visibility check.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "error": "page not found" }))
}
