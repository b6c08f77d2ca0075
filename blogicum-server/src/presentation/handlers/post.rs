use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::presentation::dto::{PageQuery, PostForm};
use crate::presentation::handlers::{AppCommentService, AppPostService, request_id};
use crate::presentation::utils::{
    AuthenticatedUser, MaybeUser, post_detail_url, profile_url, see_other,
};

#[get("/")]
pub async fn index(
    posts: web::Data<AppPostService>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let page = posts.published_feed(query.page.as_deref()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/posts/{id}/")]
pub async fn post_detail(
    posts: web::Data<AppPostService>,
    comments: web::Data<AppCommentService>,
    viewer: MaybeUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let post = posts.visible_post(post_id, viewer.id()).await?;
    let comments = comments.comments_for(post_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "post": post, "comments": comments })))
}

#[get("/posts/create/")]
pub async fn new_post_form(_user: AuthenticatedUser) -> Result<HttpResponse, DomainError> {
    Ok(HttpResponse::Ok().json(PostForm::blank()))
}

#[post("/posts/create/")]
pub async fn create_post(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: web::Data<AppPostService>,
    payload: web::Json<PostForm>,
) -> Result<HttpResponse, DomainError> {
    payload.validate()?;
    let post_id = posts
        .create_post(user.id, payload.into_inner().into_draft())
        .await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post_id,
        "post created"
    );

    Ok(see_other(&profile_url(&user.username)))
}

#[get("/posts/{id}/edit/")]
pub async fn edit_post_form(
    user: AuthenticatedUser,
    posts: web::Data<AppPostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    match posts.owned_post(user.id, post_id).await {
        Ok(post) => Ok(HttpResponse::Ok().json(post)),
        Err(DomainError::Forbidden) => Ok(see_other(&post_detail_url(post_id))),
        Err(err) => Err(err),
    }
}

#[post("/posts/{id}/edit/")]
pub async fn update_post(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: web::Data<AppPostService>,
    path: web::Path<Uuid>,
    payload: web::Json<PostForm>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    // Ownership is settled before the form is looked at, so a non-owner
    // is turned away even with an invalid payload.
    match posts.owned_post(user.id, post_id).await {
        Ok(_) => {}
        Err(DomainError::Forbidden) => return Ok(see_other(&post_detail_url(post_id))),
        Err(err) => return Err(err),
    }
    payload.validate()?;
    posts
        .update_post(user.id, post_id, payload.into_inner().into_draft())
        .await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post_id,
        "post updated"
    );

    Ok(see_other(&post_detail_url(post_id)))
}

#[get("/posts/{id}/delete/")]
pub async fn delete_post_form(
    user: AuthenticatedUser,
    posts: web::Data<AppPostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    match posts.owned_post(user.id, post_id).await {
        Ok(post) => Ok(HttpResponse::Ok().json(post)),
        Err(DomainError::Forbidden) => Ok(see_other(&post_detail_url(post_id))),
        Err(err) => Err(err),
    }
}

#[post("/posts/{id}/delete/")]
pub async fn delete_post(
    req: HttpRequest,
    user: AuthenticatedUser,
    posts: web::Data<AppPostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    match posts.delete_post(user.id, post_id).await {
        Ok(()) => {}
        Err(DomainError::Forbidden) => return Ok(see_other(&post_detail_url(post_id))),
        Err(err) => return Err(err),
    }

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post_id,
        "post deleted"
    );

    Ok(see_other("/"))
}
