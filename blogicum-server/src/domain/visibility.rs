//! Who may see or change what.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::comment::Comment;
use crate::domain::post::Post;

/// Gate for single-post retrieval. A published post is visible to
/// everyone; an unpublished one only to its author. Callers must surface
/// a failed check as not-found, so the existence of hidden posts does not
/// leak.
pub fn is_post_visible(post: &Post, viewer: Option<Uuid>) -> bool {
    post.is_published || viewer == Some(post.author_id)
}

/// Gate for the index and category feeds. Stricter than
/// [`is_post_visible`]: a post only appears once it is published, its
/// publication date has passed and its category is itself published. A
/// post without a category is never publicly listed. Authors get no
/// special treatment here; their unpublished and future-dated posts show
/// up on the detail route only.
pub fn is_post_listed_publicly(post: &Post, now: DateTime<Utc>) -> bool {
    post.is_published && post.pub_date <= now && post.category_is_published == Some(true)
}

pub fn can_mutate_post(post: &Post, actor: Uuid) -> bool {
    post.author_id == actor
}

pub fn can_mutate_comment(comment: &Comment, actor: Uuid) -> bool {
    comment.author_id == actor
}
