use actix_web::{HttpRequest, HttpResponse, get, post, web};
use serde_json::json;
use tracing::info;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::presentation::dto::{PageQuery, ProfileForm, ProfileResponse};
use crate::presentation::handlers::{AppProfileService, request_id};
use crate::presentation::utils::{AuthenticatedUser, see_other};

#[get("/profile/{username}/")]
pub async fn profile(
    profiles: web::Data<AppProfileService>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, DomainError> {
    let username = path.into_inner();
    let (user, page) = profiles
        .profile_page(&username, query.page.as_deref())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "profile": ProfileResponse::from(&user),
        "page": page
    })))
}

#[get("/edit_profile/{username}")]
pub async fn edit_profile_form(
    user: AuthenticatedUser,
    profiles: web::Data<AppProfileService>,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let username = path.into_inner();
    match profiles.owned_profile(user.id, &username).await {
        Ok(owned_profile) => Ok(HttpResponse::Ok().json(ProfileForm::from_user(&owned_profile))),
        // Someone else's profile: send the caller to log in as its owner.
        Err(DomainError::Forbidden) => Ok(see_other("/auth/login")),
        Err(err) => Err(err),
    }
}

#[post("/edit_profile/{username}")]
pub async fn update_profile(
    req: HttpRequest,
    user: AuthenticatedUser,
    profiles: web::Data<AppProfileService>,
    path: web::Path<String>,
    payload: web::Json<ProfileForm>,
) -> Result<HttpResponse, DomainError> {
    let username = path.into_inner();
    match profiles.owned_profile(user.id, &username).await {
        Ok(_) => {}
        Err(DomainError::Forbidden) => return Ok(see_other("/auth/login")),
        Err(err) => return Err(err),
    }
    payload.validate()?;
    let updated = profiles
        .update_profile(user.id, &username, payload.into_inner().into_update())
        .await?;

    info!(
        request_id = %request_id(&req),
        username = %updated.username,
        "profile updated"
    );

    Ok(HttpResponse::Ok().json(ProfileForm::from_user(&updated)))
}
