use actix_web::{HttpRequest, HttpResponse, get, post, web};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::presentation::dto::CommentForm;
use crate::presentation::handlers::{AppCommentService, request_id};
use crate::presentation::utils::{AuthenticatedUser, post_detail_url, see_other};

#[post("/posts/{id}/comment/")]
pub async fn add_comment(
    req: HttpRequest,
    user: AuthenticatedUser,
    comments: web::Data<AppCommentService>,
    path: web::Path<Uuid>,
    payload: web::Json<CommentForm>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    payload.validate()?;
    comments.add_comment(user.id, post_id, &payload.text).await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        post_id = %post_id,
        "comment added"
    );

    Ok(see_other(&post_detail_url(post_id)))
}

#[get("/posts/{post_id}/edit_comment/{comment_id}/")]
pub async fn edit_comment_form(
    user: AuthenticatedUser,
    comments: web::Data<AppCommentService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, comment_id) = path.into_inner();
    match comments.owned_comment(user.id, post_id, comment_id).await {
        Ok(comment) => Ok(HttpResponse::Ok().json(comment)),
        Err(DomainError::Forbidden) => Ok(see_other(&post_detail_url(post_id))),
        Err(err) => Err(err),
    }
}

#[post("/posts/{post_id}/edit_comment/{comment_id}/")]
pub async fn edit_comment(
    req: HttpRequest,
    user: AuthenticatedUser,
    comments: web::Data<AppCommentService>,
    path: web::Path<(Uuid, Uuid)>,
    payload: web::Json<CommentForm>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, comment_id) = path.into_inner();
    match comments.owned_comment(user.id, post_id, comment_id).await {
        Ok(_) => {}
        Err(DomainError::Forbidden) => return Ok(see_other(&post_detail_url(post_id))),
        Err(err) => return Err(err),
    }
    payload.validate()?;
    comments
        .edit_comment(user.id, post_id, comment_id, &payload.text)
        .await?;

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        comment_id = %comment_id,
        "comment updated"
    );

    Ok(see_other(&post_detail_url(post_id)))
}

#[get("/posts/{post_id}/delete_comment/{comment_id}")]
pub async fn delete_comment_form(
    user: AuthenticatedUser,
    comments: web::Data<AppCommentService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, comment_id) = path.into_inner();
    match comments.owned_comment(user.id, post_id, comment_id).await {
        Ok(comment) => Ok(HttpResponse::Ok().json(comment)),
        Err(DomainError::Forbidden) => Ok(see_other(&post_detail_url(post_id))),
        Err(err) => Err(err),
    }
}

#[post("/posts/{post_id}/delete_comment/{comment_id}")]
pub async fn delete_comment(
    req: HttpRequest,
    user: AuthenticatedUser,
    comments: web::Data<AppCommentService>,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, DomainError> {
    let (post_id, comment_id) = path.into_inner();
    match comments.delete_comment(user.id, post_id, comment_id).await {
        Ok(()) => {}
        Err(DomainError::Forbidden) => return Ok(see_other(&post_detail_url(post_id))),
        Err(err) => return Err(err),
    }

    info!(
        request_id = %request_id(&req),
        username = %user.username,
        comment_id = %comment_id,
        "comment deleted"
    );

    Ok(see_other(&post_detail_url(post_id)))
}
