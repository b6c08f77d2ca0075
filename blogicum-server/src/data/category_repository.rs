use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::error::DomainError;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories hidden by the admins do not resolve by slug at all.
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, title, description, slug, is_published, created_at
            FROM categories
            WHERE slug = $1 AND is_published
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find category {}: {}", slug, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, title, description, slug, is_published, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find category {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }
}
