use actix_web::{HttpResponse, Responder, Scope, post, web};
use tracing::info;
use validator::Validate;

use crate::domain::error::DomainError;
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::presentation::handlers::AppAuthService;

pub fn scope() -> Scope {
    web::scope("/auth")
        .service(register)
        .service(login)
        .service(token)
}

#[post("/register")]
async fn register(
    service: web::Data<AppAuthService>,
    payload: web::Json<RegisterRequest>,
) -> Result<impl Responder, DomainError> {
    payload.validate()?;
    let RegisterRequest {
        username,
        email,
        password,
    } = payload.into_inner();

    let user = service
        .register(username, email, password.clone())
        .await?;
    info!(user_id = %user.id, username = %user.username, "user registered");

    let jwt = service.login(&user.username, &password).await?;

    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: jwt,
        expires_in: 3600 * 24,
        token_type: "Bearer".to_string(),
    }))
}

#[post("/login")]
async fn login(
    service: web::Data<AppAuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, DomainError> {
    let jwt = service.login(&payload.username, &payload.password).await?;

    info!(username = %payload.username, "user logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: jwt,
        expires_in: 3600 * 24,
        token_type: "Bearer".to_string(),
    }))
}

#[post("/token")]
async fn token(
    service: web::Data<AppAuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, DomainError> {
    let jwt = service.login(&payload.username, &payload.password).await?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: jwt,
        expires_in: 3600 * 24,
        token_type: "Bearer".to_string(),
    }))
}
