//! Submission-layer inputs with explicit per-field validation, decoupled
//! from any rendering concern. Validation failures are recoverable: the
//! caller gets field-level errors and nothing is persisted.

use poem_openapi::Object;
use serde::Deserialize;
use validator::Validate;

use crate::entities::post::PostStatus;

#[derive(Debug, Clone, Deserialize, Object, Validate)]
pub struct CommentInput {
    #[validate(length(min = 1, max = 2000, message = "body must be 1 to 2000 characters"))]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, Object, Validate)]
pub struct PostInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Unique URL slug; derived from the title when omitted.
    #[validate(length(max = 220))]
    pub slug: Option<String>,
    pub summary: Option<String>,
    /// Rich-text HTML.
    pub content: String,
    /// Media path returned by the upload endpoint.
    pub cover_image: Option<String>,
    #[oai(default)]
    pub categories: Vec<i64>,
    /// Defaults to draft; choosing published triggers the publication
    /// transition on save.
    pub status: Option<PostStatus>,
}

#[derive(Debug, Clone, Deserialize, Object, Validate)]
pub struct SignupInput {
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Object, Validate)]
pub struct TokenInput {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_body_bounds() {
        assert!(CommentInput { body: String::new() }.validate().is_err());
        assert!(CommentInput { body: "x".repeat(2001) }.validate().is_err());
        assert!(CommentInput { body: "x".into() }.validate().is_ok());
        assert!(CommentInput { body: "x".repeat(2000) }.validate().is_ok());
    }

    #[test]
    fn signup_requires_valid_email() {
        let input = SignupInput {
            username: "alice".into(),
            email: "not-an-email".into(),
            password: "s3cret-pass".into(),
        };
        assert!(input.validate().is_err());
    }
}
