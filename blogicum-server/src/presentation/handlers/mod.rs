pub mod auth;
pub mod category;
pub mod comment;
pub mod pages;
pub mod post;
pub mod profile;

use actix_web::{HttpMessage, HttpRequest};

use crate::application::auth_service::AuthService;
use crate::application::comment_service::CommentService;
use crate::application::post_service::PostService;
use crate::application::profile_service::ProfileService;
use crate::data::category_repository::PostgresCategoryRepository;
use crate::data::comment_repository::PostgresCommentRepository;
use crate::data::location_repository::PostgresLocationRepository;
use crate::data::post_repository::PostgresPostRepository;
use crate::data::user_repository::PostgresUserRepository;

pub type AppAuthService = AuthService<PostgresUserRepository>;
pub type AppPostService =
    PostService<PostgresPostRepository, PostgresCategoryRepository, PostgresLocationRepository>;
pub type AppCommentService = CommentService<PostgresCommentRepository, PostgresPostRepository>;
pub type AppProfileService = ProfileService<PostgresUserRepository, PostgresPostRepository>;

pub(crate) fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<crate::presentation::middleware::RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
