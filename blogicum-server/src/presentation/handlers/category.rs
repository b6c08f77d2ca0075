use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::domain::error::DomainError;
use crate::presentation::dto::PageQuery;
use crate::presentation::handlers::AppPostService;

#[get("/category/{slug}/")]
pub async fn category_posts(
    posts: web::Data<AppPostService>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let slug = path.into_inner();
    let (category, page) = posts.category_page(&slug, query.page.as_deref()).await?;
    Ok(HttpResponse::Ok().json(json!({ "category": category, "page": page })))
}
