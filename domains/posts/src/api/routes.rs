//! Route definitions for Posts domain API
//!
//! `/api/posts/my` and `/api/posts/search` are literal routes and win over
//! the `{post_uuid}` capture.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{comments, posts};
use super::middleware::PostsState;

/// Create post routes. `lab_reset` adds the unauthenticated
/// `DELETE /api/posts` that wipes all content.
fn post_routes(lab_reset: bool) -> Router<PostsState> {
    let mut collection = post(posts::create_post).get(posts::list_posts);
    if lab_reset {
        collection = collection.delete(posts::delete_all_posts);
    }

    Router::new()
        .route("/api/posts", collection)
        .route("/api/posts/my", get(posts::my_posts))
        .route("/api/posts/search", get(posts::search_posts))
        .route("/api/posts/{post_uuid}", get(posts::get_post))
}

/// Create comment routes
fn comment_routes() -> Router<PostsState> {
    Router::new()
        .route("/api/comments", post(comments::create_comment))
        .route("/api/comments/my", get(comments::my_comments))
        .route(
            "/api/posts/{post_uuid}/comments",
            get(comments::list_post_comments),
        )
}

/// Create all Posts domain API routes
pub fn routes(lab_reset: bool) -> Router<PostsState> {
    Router::new()
        .merge(post_routes(lab_reset))
        .merge(comment_routes())
}
