//! Posts domain state, auth backend integration and login prompts

use crate::PostsRepositories;
use axum::extract::FromRef;
use sqlx::SqlitePool;
use xsslab_auth::{AuthBackend, AuthPrompt};

/// Application state for the Posts domain
#[derive(Clone)]
pub struct PostsState {
    pub repos: PostsRepositories,
    pub auth: AuthBackend,
}

impl PostsState {
    pub fn new(pool: SqlitePool, auth: AuthBackend) -> Self {
        Self {
            repos: PostsRepositories::new(pool),
            auth,
        }
    }
}

impl FromRef<PostsState> for AuthBackend {
    fn from_ref(state: &PostsState) -> Self {
        state.auth.clone()
    }
}

#[derive(Debug)]
pub struct CreatePostPrompt;

impl AuthPrompt for CreatePostPrompt {
    const MESSAGE: &'static str = "You must be logged in to create a post";
}

#[derive(Debug)]
pub struct MyPostsPrompt;

impl AuthPrompt for MyPostsPrompt {
    const MESSAGE: &'static str = "You must be logged in to view your posts";
}

#[derive(Debug)]
pub struct CommentPrompt;

impl AuthPrompt for CommentPrompt {
    const MESSAGE: &'static str = "You must be logged in to comment";
}

#[derive(Debug)]
pub struct MyCommentsPrompt;

impl AuthPrompt for MyCommentsPrompt {
    const MESSAGE: &'static str = "You must be logged in to view your comments";
}
