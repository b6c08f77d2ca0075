use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::error::DomainError;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn create(
        &self,
        id: Uuid,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<(), DomainError>;
    /// Looks the comment up under a specific post; a comment id paired
    /// with the wrong post id does not resolve.
    async fn find_by_id(&self, id: Uuid, post_id: Uuid) -> Result<Option<Comment>, DomainError>;
    async fn update_text(&self, id: Uuid, text: &str) -> Result<(), DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
    /// Comments under a post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(
        &self,
        id: Uuid,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, text)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(post_id)
        .bind(author_id)
        .bind(text)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create comment: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(comment_id = %id, post_id = %post_id, "comment created");
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid, post_id: Uuid) -> Result<Option<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT cm.id, cm.post_id, cm.author_id, u.username AS author_username,
                   cm.text, cm.created_at
            FROM comments cm
            JOIN users u ON u.id = cm.author_id
            WHERE cm.id = $1 AND cm.post_id = $2
            "#,
        )
        .bind(id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find comment {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn update_text(&self, id: Uuid, text: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE comments SET text = $1 WHERE id = $2")
            .bind(text)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to update comment {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        info!(comment_id = %id, "comment updated");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete comment {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        info!(comment_id = %id, "comment deleted");
        Ok(())
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        sqlx::query_as::<_, Comment>(
            r#"
            SELECT cm.id, cm.post_id, cm.author_id, u.username AS author_username,
                   cm.text, cm.created_at
            FROM comments cm
            JOIN users u ON u.id = cm.author_id
            WHERE cm.post_id = $1
            ORDER BY cm.created_at
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching comments of {}: {}", post_id, e);
            DomainError::Internal(e.to_string())
        })
    }
}
