//! Post API handlers
//!
//! - POST /api/posts - Create a post
//! - GET /api/posts - Public feed
//! - GET /api/posts/my - Posts by the caller
//! - GET /api/posts/search - Substring search over title and content
//! - GET /api/posts/{post_uuid} - One post
//! - DELETE /api/posts - Wipe all posts and comments (lab reset, opt-in)

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use xsslab_auth::AuthUser;
use xsslab_common::{
    validation::{validate_create_post, validate_search_query},
    Envelope, Error, Pagination, QueryParams, Result, Validate, ValidatedJson,
    ValidationResult,
};

use crate::api::middleware::{CreatePostPrompt, MyPostsPrompt, PostsState};
use crate::api::params::PostUuid;
use crate::domain::entities::{Post, PostView};

/// Request body for creating a post
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl Validate for CreatePostRequest {
    fn validate(&self) -> ValidationResult {
        validate_create_post(self.title.as_deref(), self.content.as_deref())
    }
}

/// Search query parameters
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: PostView,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostView>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub deleted_posts: u64,
    pub deleted_comments: &'static str,
}

type PostList = Json<Envelope<PostListResponse>>;

fn post_list(posts: Vec<PostView>) -> PostList {
    Json(Envelope::ok(PostListResponse { posts }))
}

/// Create a post as the caller
///
/// **POST /api/posts**
pub async fn create_post(
    auth: AuthUser<CreatePostPrompt>,
    State(state): State<PostsState>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Envelope<PostResponse>>)> {
    let user = auth.into_principal();
    let post = Post::new(
        request.title.unwrap_or_default(),
        request.content.unwrap_or_default(),
        user.uuid,
    );

    state
        .repos
        .posts
        .create(&post)
        .await
        .map_err(|e| Error::failed("Failed to create post", e))?;

    let view = state
        .repos
        .posts
        .find_view(&post.post_uuid)
        .await
        .map_err(|e| Error::failed("Failed to create post", e))?
        .ok_or_else(|| Error::failed("Failed to create post", "post vanished after insert"))?;

    tracing::info!(post_uuid = %post.post_uuid, user_uuid = %post.user_uuid, "Post created");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(PostResponse { post: view })),
    ))
}

/// Public feed, newest first
///
/// **GET /api/posts?limit&offset**
pub async fn list_posts(
    State(state): State<PostsState>,
    QueryParams(page): QueryParams<Pagination>,
) -> Result<PostList> {
    let posts = state
        .repos
        .posts
        .list(page.limit(), page.offset())
        .await
        .map_err(|e| Error::failed("Failed to get posts", e))?;

    Ok(post_list(posts))
}

/// The caller's own posts, newest first
///
/// **GET /api/posts/my?limit&offset**
pub async fn my_posts(
    auth: AuthUser<MyPostsPrompt>,
    State(state): State<PostsState>,
    QueryParams(page): QueryParams<Pagination>,
) -> Result<PostList> {
    let posts = state
        .repos
        .posts
        .list_by_user(&auth.principal.uuid, page.limit(), page.offset())
        .await
        .map_err(|e| Error::failed("Failed to get your posts", e))?;

    Ok(post_list(posts))
}

/// Search titles and contents
///
/// **GET /api/posts/search?q&limit&offset**
///
/// A missing or empty `q` is a 400.
pub async fn search_posts(
    State(state): State<PostsState>,
    QueryParams(params): QueryParams<SearchParams>,
    QueryParams(page): QueryParams<Pagination>,
) -> Result<PostList> {
    let query = params.q.unwrap_or_default();
    validate_search_query(Some(&query)).into_result()?;

    let posts = state
        .repos
        .posts
        .search(&query, page.limit(), page.offset())
        .await
        .map_err(|e| Error::failed("Failed to search posts", e))?;

    tracing::debug!(query = %query, hits = posts.len(), "Post search");

    Ok(post_list(posts))
}

/// One post
///
/// **GET /api/posts/{post_uuid}**
pub async fn get_post(
    State(state): State<PostsState>,
    PostUuid(post_uuid): PostUuid,
) -> Result<Json<Envelope<PostResponse>>> {
    let post = state
        .repos
        .posts
        .find_view(&post_uuid)
        .await
        .map_err(|e| Error::failed("Failed to get post", e))?
        .ok_or_else(|| Error::NotFound("Post not found".to_string()))?;

    Ok(Json(Envelope::ok(PostResponse { post })))
}

/// Delete every post and comment
///
/// **DELETE /api/posts**
///
/// Unauthenticated on purpose. Only mounted when the lab reset endpoint is
/// enabled in configuration.
pub async fn delete_all_posts(
    State(state): State<PostsState>,
) -> Result<Json<Envelope<ResetResponse>>> {
    let deleted_posts = state
        .repos
        .posts
        .delete_all()
        .await
        .map_err(|e| Error::failed("Failed to delete all posts", e))?;

    tracing::warn!(deleted_posts, "Lab reset wiped all posts and comments");

    Ok(Json(
        Envelope::ok(ResetResponse {
            deleted_posts,
            deleted_comments: "all",
        })
        .with_message("Successfully deleted all posts and comments"),
    ))
}
