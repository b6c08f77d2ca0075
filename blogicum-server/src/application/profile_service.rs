use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::pagination::{Page, Paginator};
use crate::domain::post::Post;
use crate::domain::user::{ProfileUpdate, User};

#[derive(Clone)]
pub struct ProfileService<U, P>
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
{
    users: Arc<U>,
    posts: Arc<P>,
    paginator: Paginator,
}

impl<U, P> ProfileService<U, P>
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
{
    pub fn new(users: Arc<U>, posts: Arc<P>, paginator: Paginator) -> Self {
        Self {
            users,
            posts,
            paginator,
        }
    }

    /// A user's profile with all of their posts, newest first. The
    /// profile page does not filter by publication state.
    pub async fn profile_page(
        &self,
        username: &str,
        raw_page: Option<&str>,
    ) -> Result<(User, Page<Post>), DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;
        let posts = self.posts.list_by_author(user.id).await?;
        let page = self.paginator.paginate(&posts, raw_page);
        Ok((user, page))
    }

    /// The profile if it belongs to the actor; `Forbidden` otherwise,
    /// which the handler translates into a redirect to the login route.
    pub async fn owned_profile(&self, actor: Uuid, username: &str) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;
        if user.id != actor {
            return Err(DomainError::Forbidden);
        }
        Ok(user)
    }

    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        actor: Uuid,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<User, DomainError> {
        let user = self.owned_profile(actor, username).await?;
        self.users.update_profile(user.id, &update).await
    }
}
