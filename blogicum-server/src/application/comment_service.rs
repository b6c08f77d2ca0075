use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::comment_repository::CommentRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::visibility::can_mutate_comment;

#[derive(Clone)]
pub struct CommentService<C, P>
where
    C: CommentRepository + 'static,
    P: PostRepository + 'static,
{
    comments: Arc<C>,
    posts: Arc<P>,
}

impl<C, P> CommentService<C, P>
where
    C: CommentRepository + 'static,
    P: PostRepository + 'static,
{
    pub fn new(comments: Arc<C>, posts: Arc<P>) -> Self {
        Self { comments, posts }
    }

    pub async fn comments_for(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        self.comments.list_for_post(post_id).await
    }

    #[instrument(skip(self, text))]
    pub async fn add_comment(
        &self,
        author_id: Uuid,
        post_id: Uuid,
        text: &str,
    ) -> Result<(), DomainError> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        self.comments
            .create(Uuid::new_v4(), post_id, author_id, text)
            .await
    }

    /// The comment if the actor owns it; `Forbidden` otherwise, which the
    /// mutation handlers translate into a redirect to the detail view.
    pub async fn owned_comment(
        &self,
        actor: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Comment, DomainError> {
        let comment = self
            .comments
            .find_by_id(comment_id, post_id)
            .await?
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        if !can_mutate_comment(&comment, actor) {
            return Err(DomainError::Forbidden);
        }
        Ok(comment)
    }

    #[instrument(skip(self, text))]
    pub async fn edit_comment(
        &self,
        actor: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
        text: &str,
    ) -> Result<(), DomainError> {
        self.owned_comment(actor, post_id, comment_id).await?;
        self.comments.update_text(comment_id, text).await
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        actor: Uuid,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), DomainError> {
        self.owned_comment(actor, post_id, comment_id).await?;
        self.comments.delete(comment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{InMemoryComments, InMemoryPosts, comment, post};
    use chrono::Utc;

    fn service(
        comments: Arc<InMemoryComments>,
        posts: Arc<InMemoryPosts>,
    ) -> CommentService<InMemoryComments, InMemoryPosts> {
        CommentService::new(comments, posts)
    }

    #[tokio::test]
    async fn non_owner_delete_redirects_away_and_deletes_nothing() {
        let commenter = Uuid::new_v4();
        let p = post(Uuid::new_v4(), true, Utc::now());
        let c = comment(p.id, commenter);
        let posts = Arc::new(InMemoryPosts::default());
        posts.seed(p.clone());
        let comments = Arc::new(InMemoryComments::default());
        comments.seed(c.clone());
        let svc = service(Arc::clone(&comments), posts);

        let result = svc.delete_comment(Uuid::new_v4(), p.id, c.id).await;
        assert!(matches!(result, Err(DomainError::Forbidden)));
        assert_eq!(svc.comments_for(p.id).await.unwrap().len(), 1);

        svc.delete_comment(commenter, p.id, c.id).await.unwrap();
        assert!(svc.comments_for(p.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_owner_edit_is_forbidden() {
        let commenter = Uuid::new_v4();
        let p = post(Uuid::new_v4(), true, Utc::now());
        let c = comment(p.id, commenter);
        let posts = Arc::new(InMemoryPosts::default());
        posts.seed(p.clone());
        let comments = Arc::new(InMemoryComments::default());
        comments.seed(c.clone());
        let svc = service(Arc::clone(&comments), posts);

        let result = svc
            .edit_comment(Uuid::new_v4(), p.id, c.id, "defaced")
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));
        assert_eq!(svc.comments_for(p.id).await.unwrap()[0].text, c.text);
    }

    #[tokio::test]
    async fn comment_id_must_belong_to_the_post_in_the_url() {
        let commenter = Uuid::new_v4();
        let p = post(Uuid::new_v4(), true, Utc::now());
        let other = post(Uuid::new_v4(), true, Utc::now());
        let c = comment(p.id, commenter);
        let posts = Arc::new(InMemoryPosts::default());
        posts.seed(p.clone());
        posts.seed(other.clone());
        let comments = Arc::new(InMemoryComments::default());
        comments.seed(c.clone());
        let svc = service(comments, posts);

        let result = svc.owned_comment(commenter, other.id, c.id).await;
        assert!(matches!(result, Err(DomainError::CommentNotFound(_))));
    }

    #[tokio::test]
    async fn commenting_on_a_missing_post_is_not_found() {
        let svc = service(
            Arc::new(InMemoryComments::default()),
            Arc::new(InMemoryPosts::default()),
        );
        let result = svc.add_comment(Uuid::new_v4(), Uuid::new_v4(), "hello").await;
        assert!(matches!(result, Err(DomainError::PostNotFound(_))));
    }
}
