use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(String),
    #[error("user already exists: {0}")]
    UserAlreadyExists(String),
    #[error("post not found: {0}")]
    PostNotFound(Uuid),
    #[error("category not found: {0}")]
    CategoryNotFound(String),
    #[error("comment not found: {0}")]
    CommentNotFound(Uuid),
    #[error("invalid form data")]
    Validation(#[from] ValidationErrors),
    #[error("no such {0}")]
    InvalidChoice(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("unauthorized")]
    Unauthorized,
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        match self {
            DomainError::UserNotFound(_)
            | DomainError::PostNotFound(_)
            | DomainError::CategoryNotFound(_)
            | DomainError::CommentNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Validation(_) | DomainError::InvalidChoice(_) => StatusCode::BAD_REQUEST,
            DomainError::Unauthorized => StatusCode::UNAUTHORIZED,
            DomainError::Forbidden => StatusCode::FORBIDDEN,
            DomainError::UserAlreadyExists(_) => StatusCode::CONFLICT,
            DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = self.to_string();
        let details = match self {
            DomainError::Validation(errors) => serde_json::to_value(errors).ok(),
            DomainError::InvalidChoice(field) => Some(json!({ "field": field })),
            DomainError::PostNotFound(id) | DomainError::CommentNotFound(id) => {
                Some(json!({ "resource": id }))
            }
            DomainError::UserNotFound(name) | DomainError::CategoryNotFound(name) => {
                Some(json!({ "resource": name }))
            }
            _ => None,
        };
        let body = ErrorBody {
            error: message.as_str(),
            details,
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
