mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::DefaultHeaders;
use actix_web::{App, HttpServer, web};

use crate::application::auth_service::AuthService;
use crate::application::comment_service::CommentService;
use crate::application::post_service::PostService;
use crate::application::profile_service::ProfileService;
use crate::data::category_repository::PostgresCategoryRepository;
use crate::data::comment_repository::PostgresCommentRepository;
use crate::data::location_repository::PostgresLocationRepository;
use crate::data::post_repository::PostgresPostRepository;
use crate::data::user_repository::PostgresUserRepository;
use crate::domain::pagination::Paginator;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::database::{create_pool, run_migrations};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::security::JwtKeys;
use crate::presentation::handlers;
use crate::presentation::middleware::RequestTrace;
use crate::presentation::utils;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env().expect("invalid configuration");
    let pool = create_pool(&config.database_url)
        .await
        .expect("failed to connect to database");
    run_migrations(&pool)
        .await
        .expect("failed to run migrations");

    let user_repo = Arc::new(PostgresUserRepository::new(pool.clone()));
    let post_repo = Arc::new(PostgresPostRepository::new(pool.clone()));
    let category_repo = Arc::new(PostgresCategoryRepository::new(pool.clone()));
    let location_repo = Arc::new(PostgresLocationRepository::new(pool.clone()));
    let comment_repo = Arc::new(PostgresCommentRepository::new(pool.clone()));

    let keys = JwtKeys::new(config.jwt_secret.clone());
    let paginator = Paginator::new(config.posts_per_page);

    let auth_service = AuthService::new(Arc::clone(&user_repo), keys.clone());
    let post_service = PostService::new(
        Arc::clone(&post_repo),
        Arc::clone(&category_repo),
        Arc::clone(&location_repo),
        paginator.clone(),
    );
    let comment_service = CommentService::new(Arc::clone(&comment_repo), Arc::clone(&post_repo));
    let profile_service = ProfileService::new(user_repo, post_repo, paginator);

    let config_data = config.clone();

    HttpServer::new(move || {
        let cors = build_cors(&config_data);
        App::new()
            .wrap(RequestTrace)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer")),
            )
            .wrap(cors)
            .app_data(web::PathConfig::default().error_handler(utils::path_not_found))
            .app_data(web::Data::new(keys.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .app_data(web::Data::new(profile_service.clone()))
            .service(handlers::auth::scope())
            .service(handlers::post::index)
            // `/posts/create/` must be registered ahead of the `{id}` routes.
            .service(handlers::post::new_post_form)
            .service(handlers::post::create_post)
            .service(handlers::post::post_detail)
            .service(handlers::post::edit_post_form)
            .service(handlers::post::update_post)
            .service(handlers::post::delete_post_form)
            .service(handlers::post::delete_post)
            .service(handlers::comment::add_comment)
            .service(handlers::comment::edit_comment_form)
            .service(handlers::comment::edit_comment)
            .service(handlers::comment::delete_comment_form)
            .service(handlers::comment::delete_comment)
            .service(handlers::category::category_posts)
            .service(handlers::profile::profile)
            .service(handlers::profile::edit_profile_form)
            .service(handlers::profile::update_profile)
            .service(handlers::pages::about)
            .service(handlers::pages::rules)
            .default_service(web::route().to(handlers::pages::not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in &config.cors_origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}
