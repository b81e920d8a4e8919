//! Post and comment entities
//!
//! Content is stored and returned exactly as submitted. Nothing here
//! escapes or sanitizes markup.

use serde::Serialize;
use uuid::Uuid;

/// A post as written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_uuid: String,
    pub title: String,
    pub content: String,
    pub time_create: i64,
    pub user_uuid: String,
}

impl Post {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        user_uuid: impl Into<String>,
    ) -> Self {
        Self {
            post_uuid: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
            time_create: chrono::Utc::now().timestamp(),
            user_uuid: user_uuid.into(),
        }
    }
}

/// A post joined with its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PostView {
    pub post_uuid: String,
    pub title: String,
    pub content: String,
    pub time_create: i64,
    pub user_uuid: String,
    pub username: String,
    pub user_name: String,
}

/// A comment as written to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub comment_id: String,
    pub content: String,
    pub user_uuid: String,
    pub post_uuid: String,
}

impl Comment {
    /// New comment; ids are time-ordered so sorting by id follows creation order
    pub fn new(
        content: impl Into<String>,
        user_uuid: impl Into<String>,
        post_uuid: impl Into<String>,
    ) -> Self {
        Self {
            comment_id: Uuid::now_v7().to_string(),
            content: content.into(),
            user_uuid: user_uuid.into(),
            post_uuid: post_uuid.into(),
        }
    }
}

/// A comment joined with its author
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CommentView {
    pub comment_id: String,
    pub content: String,
    pub user_uuid: String,
    pub post_uuid: String,
    pub username: String,
    pub user_name: String,
}

/// A comment joined with its author and the title of the post it is on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserCommentView {
    pub comment_id: String,
    pub content: String,
    pub user_uuid: String,
    pub post_uuid: String,
    pub username: String,
    pub user_name: String,
    pub post_title: String,
}
