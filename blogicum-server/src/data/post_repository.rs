use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft};

const POST_SELECT: &str = r#"SELECT
    p.id, p.author_id, u.username AS author_username,
    p.title, p.text, p.pub_date, p.image_url, p.is_published, p.created_at,
    p.category_id, c.title AS category_title, c.slug AS category_slug,
    c.is_published AS category_is_published,
    p.location_id, l.name AS location_name
FROM posts p
JOIN users u ON u.id = p.author_id
LEFT JOIN categories c ON c.id = p.category_id
LEFT JOIN locations l ON l.id = p.location_id
"#;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, id: Uuid, author_id: Uuid, draft: &PostDraft)
    -> Result<(), DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn update(&self, id: Uuid, draft: &PostDraft) -> Result<(), DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    /// Publicly listed posts, newest first: published, past their
    /// publication date and in a published category.
    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, DomainError>;
    async fn list_by_category(
        &self,
        category_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError>;
    /// Every post of the author regardless of publication state, newest
    /// first. The profile page shows them all.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(
        &self,
        id: Uuid,
        author_id: Uuid,
        draft: &PostDraft,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts
                (id, author_id, title, text, pub_date, is_published,
                 category_id, location_id, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(&draft.title)
        .bind(&draft.text)
        .bind(draft.pub_date)
        .bind(draft.is_published)
        .bind(draft.category_id)
        .bind(draft.location_id)
        .bind(&draft.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = %id, author_id = %author_id, "post created");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!("{POST_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("db error find_by_id {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })
    }

    async fn update(&self, id: Uuid, draft: &PostDraft) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE posts
            SET title = $1, text = $2, pub_date = $3, is_published = $4,
                category_id = $5, location_id = $6, image_url = $7
            WHERE id = $8
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.text)
        .bind(draft.pub_date)
        .bind(draft.is_published)
        .bind(draft.category_id)
        .bind(draft.location_id)
        .bind(&draft.image_url)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        info!(post_id = %id, "post updated");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        info!(post_id = %id, "post deleted");
        Ok(())
    }

    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!(
            r#"
            {POST_SELECT}
            WHERE p.is_published AND p.pub_date <= $1 AND c.is_published
            ORDER BY p.pub_date DESC
            "#
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching the feed: {}", e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!(
            r#"
            {POST_SELECT}
            WHERE p.category_id = $1 AND p.is_published AND p.pub_date <= $2
            ORDER BY p.pub_date DESC
            "#
        ))
        .bind(category_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching category {}: {}", category_id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!(
            r#"
            {POST_SELECT}
            WHERE p.author_id = $1
            ORDER BY p.pub_date DESC
            "#
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts of {}: {}", author_id, e);
            DomainError::Internal(e.to_string())
        })
    }
}
