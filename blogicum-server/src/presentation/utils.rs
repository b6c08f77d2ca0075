use actix_web::dev::Payload;
use actix_web::error::PathError;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use futures_util::future::{Ready, ready};
use serde_json::json;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::infrastructure::security::JwtKeys;

/// The caller's identity, taken from the bearer token. Handlers that
/// require login take this as an argument; the session lookup is a
/// capability injected per request, not ambient state.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// A viewer that may or may not be logged in; public routes use this so
/// an invalid token degrades to anonymous instead of failing.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthenticatedUser>);

impl MaybeUser {
    pub fn id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|user| user.id)
    }
}

impl FromRequest for MaybeUser {
    type Error = DomainError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser(authenticate(req).ok())))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, DomainError> {
    let keys = req
        .app_data::<web::Data<JwtKeys>>()
        .ok_or_else(|| DomainError::Internal("jwt keys missing".into()))?;
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(DomainError::Unauthorized)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(DomainError::Unauthorized)?;
    let claims = keys
        .verify_token(token)
        .map_err(|_| DomainError::Unauthorized)?;
    let id = Uuid::parse_str(&claims.sub).map_err(|_| DomainError::Unauthorized)?;
    Ok(AuthenticatedUser {
        id,
        username: claims.username,
    })
}

/// A path segment that does not parse (say, a mangled post id) is a URL
/// that resolves to nothing, and renders as not-found rather than a bad
/// request.
pub fn path_not_found(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        err,
        HttpResponse::NotFound().json(json!({ "error": "page not found" })),
    )
    .into()
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn post_detail_url(post_id: Uuid) -> String {
    format!("/posts/{post_id}/")
}

pub fn profile_url(username: &str) -> String {
    format!("/profile/{username}/")
}
