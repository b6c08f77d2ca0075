use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as read back from storage, joined with the names of its author,
/// category and location so a single fetch is enough to render it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub category_title: Option<String>,
    pub category_slug: Option<String>,
    #[serde(skip_serializing)]
    pub category_is_published: Option<bool>,
    pub location_id: Option<Uuid>,
    pub location_name: Option<String>,
}

/// The writable fields of a post, as submitted by the create and edit
/// forms. `pub_date` may lie in the future to schedule publication.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub is_published: bool,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub image_url: Option<String>,
}
