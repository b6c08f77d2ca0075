use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::post::PostDraft;
use crate::domain::user::{ProfileUpdate, User};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

// ======================= POSTS =======================

/// The post create/edit form. Both routes submit the full set of fields,
/// so one shape serves create and edit alike.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1))]
    pub text: String,
    pub pub_date: DateTime<Utc>,
    #[serde(default = "default_published")]
    pub is_published: bool,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    #[validate(url)]
    pub image_url: Option<String>,
}

impl PostForm {
    /// Unfilled form values served by the create route's GET half.
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            text: String::new(),
            pub_date: Utc::now(),
            is_published: true,
            category_id: None,
            location_id: None,
            image_url: None,
        }
    }

    pub fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title,
            text: self.text,
            pub_date: self.pub_date,
            is_published: self.is_published,
            category_id: self.category_id,
            location_id: self.location_id,
            image_url: self.image_url,
        }
    }
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

// ======================= COMMENTS =======================

#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1))]
    pub text: String,
}

// ======================= PROFILES =======================

/// The public face of a profile; the email stays on the edit form.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(length(max = 150))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn into_update(self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_form_requires_title_and_text() {
        let mut form = PostForm::blank();
        assert!(form.validate().is_err());
        form.title = "Летний вечер".into();
        form.text = "Что-то про закат.".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn post_form_rejects_overlong_title_and_bad_image_url() {
        let mut form = PostForm::blank();
        form.title = "x".repeat(257);
        form.text = "body".into();
        assert!(form.validate().is_err());

        form.title = "ok".into();
        form.image_url = Some("not a url".into());
        assert!(form.validate().is_err());
        form.image_url = Some("https://example.com/cat.jpg".into());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn register_request_checks_email_shape() {
        let req = RegisterRequest {
            username: "sasha".into(),
            email: "not-an-email".into(),
            password: "long enough".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn comment_form_rejects_empty_text() {
        assert!(CommentForm { text: String::new() }.validate().is_err());
        assert!(CommentForm { text: "hi".into() }.validate().is_ok());
    }
}
