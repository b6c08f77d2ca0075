use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::user::{ProfileUpdate, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<User, DomainError>;
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create user: {}", e);
            match e.as_database_error().and_then(|db| db.constraint()) {
                Some(c) if c.contains("users_email") => {
                    DomainError::UserAlreadyExists("email already registered".to_string())
                }
                Some(c) if c.contains("users_username") => {
                    DomainError::UserAlreadyExists("username already taken".to_string())
                }
                _ => DomainError::Internal(format!("database error: {}", e)),
            }
        })?;

        info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, first_name, last_name, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by username {}: {}", username, e);
            DomainError::Internal(format!("database error: {}", e))
        })
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<User, DomainError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $1, last_name = $2, email = $3
            WHERE id = $4
            RETURNING id, username, email, password_hash, first_name, last_name, created_at
            "#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.email)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update profile {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        info!(user_id = %id, "profile updated");
        Ok(user)
    }
}
