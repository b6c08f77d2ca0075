use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::data::category_repository::CategoryRepository;
use crate::data::location_repository::LocationRepository;
use crate::data::post_repository::PostRepository;
use crate::domain::category::Category;
use crate::domain::error::DomainError;
use crate::domain::pagination::{Page, Paginator};
use crate::domain::post::{Post, PostDraft};
use crate::domain::visibility::{can_mutate_post, is_post_visible};

#[derive(Clone)]
pub struct PostService<P, C, L>
where
    P: PostRepository + 'static,
    C: CategoryRepository + 'static,
    L: LocationRepository + 'static,
{
    posts: Arc<P>,
    categories: Arc<C>,
    locations: Arc<L>,
    paginator: Paginator,
}

impl<P, C, L> PostService<P, C, L>
where
    P: PostRepository + 'static,
    C: CategoryRepository + 'static,
    L: LocationRepository + 'static,
{
    pub fn new(posts: Arc<P>, categories: Arc<C>, locations: Arc<L>, paginator: Paginator) -> Self {
        Self {
            posts,
            categories,
            locations,
            paginator,
        }
    }

    /// The public feed: publicly listed posts, newest first.
    pub async fn published_feed(&self, raw_page: Option<&str>) -> Result<Page<Post>, DomainError> {
        let posts = self.posts.list_published(Utc::now()).await?;
        Ok(self.paginator.paginate(&posts, raw_page))
    }

    /// A published category and its publicly listed posts. An unpublished
    /// or unknown slug is not found.
    pub async fn category_page(
        &self,
        slug: &str,
        raw_page: Option<&str>,
    ) -> Result<(Category, Page<Post>), DomainError> {
        let category = self
            .categories
            .find_published_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::CategoryNotFound(slug.to_string()))?;
        let posts = self.posts.list_by_category(category.id, Utc::now()).await?;
        let page = self.paginator.paginate(&posts, raw_page);
        Ok((category, page))
    }

    /// Single-post retrieval with 404 semantics: a post the viewer may
    /// not see is reported exactly like one that does not exist.
    pub async fn visible_post(&self, id: Uuid, viewer: Option<Uuid>) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))?;
        if !is_post_visible(&post, viewer) {
            return Err(DomainError::PostNotFound(id));
        }
        Ok(post)
    }

    /// The post if the actor owns it; `Forbidden` otherwise, which the
    /// mutation handlers translate into a redirect to the detail view.
    pub async fn owned_post(&self, actor: Uuid, id: Uuid) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))?;
        if !can_mutate_post(&post, actor) {
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }

    #[instrument(skip(self, draft))]
    pub async fn create_post(&self, author_id: Uuid, draft: PostDraft) -> Result<Uuid, DomainError> {
        self.check_choices(&draft).await?;
        let id = Uuid::new_v4();
        self.posts.create(id, author_id, &draft).await?;
        Ok(id)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_post(
        &self,
        actor: Uuid,
        id: Uuid,
        draft: PostDraft,
    ) -> Result<(), DomainError> {
        self.owned_post(actor, id).await?;
        self.check_choices(&draft).await?;
        self.posts.update(id, &draft).await
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, actor: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.owned_post(actor, id).await?;
        self.posts.delete(id).await
    }

    /// The form's category and location selects must point at existing
    /// rows, like any other field failure.
    async fn check_choices(&self, draft: &PostDraft) -> Result<(), DomainError> {
        if let Some(category_id) = draft.category_id {
            self.categories
                .find_by_id(category_id)
                .await?
                .ok_or(DomainError::InvalidChoice("category"))?;
        }
        if let Some(location_id) = draft.location_id {
            self.locations
                .find_by_id(location_id)
                .await?
                .ok_or(DomainError::InvalidChoice("location"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        InMemoryCategories, InMemoryLocations, InMemoryPosts, category, draft, post,
    };
    use chrono::Duration;

    fn service(
        posts: Arc<InMemoryPosts>,
        categories: Arc<InMemoryCategories>,
    ) -> PostService<InMemoryPosts, InMemoryCategories, InMemoryLocations> {
        PostService::new(
            posts,
            categories,
            Arc::new(InMemoryLocations::default()),
            Paginator::new(10),
        )
    }

    #[tokio::test]
    async fn author_sees_own_unpublished_post_others_get_not_found() {
        let author = Uuid::new_v4();
        let hidden = post(author, false, Utc::now() - Duration::hours(1));
        let posts = Arc::new(InMemoryPosts::default());
        posts.seed(hidden.clone());
        let svc = service(posts, Arc::new(InMemoryCategories::default()));

        assert!(svc.visible_post(hidden.id, Some(author)).await.is_ok());
        let stranger = svc.visible_post(hidden.id, Some(Uuid::new_v4())).await;
        assert!(matches!(stranger, Err(DomainError::PostNotFound(_))));
        let anonymous = svc.visible_post(hidden.id, None).await;
        assert!(matches!(anonymous, Err(DomainError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn future_dated_post_stays_out_of_the_feed_but_not_the_detail() {
        let author = Uuid::new_v4();
        let scheduled = post(author, true, Utc::now() + Duration::days(1));
        let live = post(author, true, Utc::now() - Duration::hours(1));
        let posts = Arc::new(InMemoryPosts::default());
        posts.seed(scheduled.clone());
        posts.seed(live.clone());
        let svc = service(posts, Arc::new(InMemoryCategories::default()));

        let feed = svc.published_feed(None).await.unwrap();
        let ids: Vec<Uuid> = feed.items.iter().map(|p| p.id).collect();
        assert!(ids.contains(&live.id));
        assert!(!ids.contains(&scheduled.id));

        assert!(svc.visible_post(scheduled.id, Some(author)).await.is_ok());
    }

    #[tokio::test]
    async fn non_owner_update_is_forbidden_and_changes_nothing() {
        let author = Uuid::new_v4();
        let original = post(author, true, Utc::now() - Duration::hours(1));
        let posts = Arc::new(InMemoryPosts::default());
        posts.seed(original.clone());
        let svc = service(Arc::clone(&posts), Arc::new(InMemoryCategories::default()));

        let mut attempted = draft(&original);
        attempted.title = "hijacked".into();
        let result = svc
            .update_post(Uuid::new_v4(), original.id, attempted)
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));

        let stored = posts.get(original.id).unwrap();
        assert_eq!(stored.title, original.title);
    }

    #[tokio::test]
    async fn non_owner_delete_is_forbidden() {
        let author = Uuid::new_v4();
        let p = post(author, true, Utc::now());
        let posts = Arc::new(InMemoryPosts::default());
        posts.seed(p.clone());
        let svc = service(Arc::clone(&posts), Arc::new(InMemoryCategories::default()));

        let result = svc.delete_post(Uuid::new_v4(), p.id).await;
        assert!(matches!(result, Err(DomainError::Forbidden)));
        assert!(posts.get(p.id).is_some());

        svc.delete_post(author, p.id).await.unwrap();
        assert!(posts.get(p.id).is_none());
    }

    #[tokio::test]
    async fn hidden_category_slug_is_not_found() {
        let categories = Arc::new(InMemoryCategories::default());
        let mut hidden = category("winter");
        hidden.is_published = false;
        categories.seed(hidden);
        let svc = service(Arc::new(InMemoryPosts::default()), categories);

        let result = svc.category_page("winter", None).await;
        assert!(matches!(result, Err(DomainError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_unknown_category() {
        let author = Uuid::new_v4();
        let template = post(author, true, Utc::now());
        let mut bad = draft(&template);
        bad.category_id = Some(Uuid::new_v4());
        let svc = service(
            Arc::new(InMemoryPosts::default()),
            Arc::new(InMemoryCategories::default()),
        );

        let result = svc.create_post(author, bad).await;
        assert!(matches!(result, Err(DomainError::InvalidChoice("category"))));
    }
}
