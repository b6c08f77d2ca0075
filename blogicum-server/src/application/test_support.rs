//! In-memory repository implementations and fixtures for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::data::category_repository::CategoryRepository;
use crate::data::comment_repository::CommentRepository;
use crate::data::location_repository::LocationRepository;
use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::category::Category;
use crate::domain::comment::Comment;
use crate::domain::error::DomainError;
use crate::domain::location::Location;
use crate::domain::post::{Post, PostDraft};
use crate::domain::user::{ProfileUpdate, User};
use crate::domain::visibility::is_post_listed_publicly;

pub fn post(author_id: Uuid, is_published: bool, pub_date: DateTime<Utc>) -> Post {
    Post {
        id: Uuid::new_v4(),
        author_id,
        author_username: "author".into(),
        title: "a title".into(),
        text: "a text".into(),
        pub_date,
        image_url: None,
        is_published,
        created_at: Utc::now(),
        category_id: Some(Uuid::new_v4()),
        category_title: Some("travel".into()),
        category_slug: Some("travel".into()),
        category_is_published: Some(true),
        location_id: None,
        location_name: None,
    }
}

pub fn draft(post: &Post) -> PostDraft {
    PostDraft {
        title: post.title.clone(),
        text: post.text.clone(),
        pub_date: post.pub_date,
        is_published: post.is_published,
        category_id: None,
        location_id: None,
        image_url: post.image_url.clone(),
    }
}

pub fn category(slug: &str) -> Category {
    Category {
        id: Uuid::new_v4(),
        title: slug.to_string(),
        description: String::new(),
        slug: slug.to_string(),
        is_published: true,
        created_at: Utc::now(),
    }
}

pub fn user(username: &str) -> User {
    User::new(
        username.to_string(),
        format!("{username}@example.com"),
        "hash".to_string(),
    )
}

pub fn comment(post_id: Uuid, author_id: Uuid) -> Comment {
    Comment {
        id: Uuid::new_v4(),
        post_id,
        author_id,
        author_username: "commenter".into(),
        text: "first!".into(),
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct InMemoryPosts {
    rows: Mutex<Vec<Post>>,
}

impl InMemoryPosts {
    pub fn seed(&self, post: Post) {
        self.rows.lock().unwrap().push(post);
    }

    pub fn get(&self, id: Uuid) -> Option<Post> {
        self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }
}

#[async_trait]
impl PostRepository for InMemoryPosts {
    async fn create(
        &self,
        id: Uuid,
        author_id: Uuid,
        draft: &PostDraft,
    ) -> Result<(), DomainError> {
        let mut row = post(author_id, draft.is_published, draft.pub_date);
        row.id = id;
        row.title = draft.title.clone();
        row.text = draft.text.clone();
        row.category_id = draft.category_id;
        row.category_is_published = draft.category_id.map(|_| true);
        row.location_id = draft.location_id;
        row.image_url = draft.image_url.clone();
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.get(id))
    }

    async fn update(&self, id: Uuid, draft: &PostDraft) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|p| p.id == id) {
            row.title = draft.title.clone();
            row.text = draft.text.clone();
            row.pub_date = draft.pub_date;
            row.is_published = draft.is_published;
            row.category_id = draft.category_id;
            row.location_id = draft.location_id;
            row.image_url = draft.image_url.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.rows.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_published(&self, now: DateTime<Utc>) -> Result<Vec<Post>, DomainError> {
        let mut rows: Vec<Post> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| is_post_listed_publicly(p, now))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(rows)
    }

    async fn list_by_category(
        &self,
        category_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Vec<Post>, DomainError> {
        let mut rows: Vec<Post> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.category_id == Some(category_id) && p.is_published && p.pub_date <= now
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(rows)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let mut rows: Vec<Post> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        Ok(rows)
    }
}

#[derive(Default)]
pub struct InMemoryCategories {
    rows: Mutex<Vec<Category>>,
}

impl InMemoryCategories {
    pub fn seed(&self, category: Category) {
        self.rows.lock().unwrap().push(category);
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategories {
    async fn find_published_by_slug(&self, slug: &str) -> Result<Option<Category>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.slug == slug && c.is_published)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryLocations {
    rows: Mutex<Vec<Location>>,
}

#[async_trait]
impl LocationRepository for InMemoryLocations {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Location>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUsers {
    pub fn seed(&self, user: User) {
        self.rows.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == user.username) {
            return Err(DomainError::UserAlreadyExists(user.username));
        }
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update_profile(&self, id: Uuid, update: &ProfileUpdate) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))?;
        row.first_name = update.first_name.clone();
        row.last_name = update.last_name.clone();
        row.email = update.email.clone();
        Ok(row.clone())
    }
}

#[derive(Default)]
pub struct InMemoryComments {
    rows: Mutex<Vec<Comment>>,
}

impl InMemoryComments {
    pub fn seed(&self, comment: Comment) {
        self.rows.lock().unwrap().push(comment);
    }
}

#[async_trait]
impl CommentRepository for InMemoryComments {
    async fn create(
        &self,
        id: Uuid,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
    ) -> Result<(), DomainError> {
        let mut row = comment(post_id, author_id);
        row.id = id;
        row.text = text.to_string();
        self.rows.lock().unwrap().push(row);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid, post_id: Uuid) -> Result<Option<Comment>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.post_id == post_id)
            .cloned())
    }

    async fn update_text(&self, id: Uuid, text: &str) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|c| c.id == id) {
            row.text = text.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let mut rows: Vec<Comment> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        rows.sort_by_key(|c| c.created_at);
        Ok(rows)
    }
}
