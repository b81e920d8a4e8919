//! Comment API handlers
//!
//! - POST /api/comments - Comment on a post
//! - GET /api/posts/{post_uuid}/comments - Comments on a post
//! - GET /api/comments/my - Comments by the caller

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use xsslab_auth::AuthUser;
use xsslab_common::{
    validation::validate_create_comment, Envelope, Error, Result, Validate, ValidatedJson,
    ValidationResult,
};

use crate::api::middleware::{CommentPrompt, MyCommentsPrompt, PostsState};
use crate::api::params::PostUuid;
use crate::domain::entities::{Comment, CommentView, UserCommentView};

/// Request body for creating a comment
#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
    pub post_uuid: Option<String>,
}

impl Validate for CreateCommentRequest {
    fn validate(&self) -> ValidationResult {
        validate_create_comment(self.content.as_deref(), self.post_uuid.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: CommentView,
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse<T> {
    pub comments: Vec<T>,
}

fn post_not_found() -> Error {
    Error::NotFound("Post not found".to_string())
}

/// Comment on a post as the caller
///
/// **POST /api/comments**
///
/// The post must exist at the time of the check; 404 otherwise.
pub async fn create_comment(
    auth: AuthUser<CommentPrompt>,
    State(state): State<PostsState>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Envelope<CommentResponse>>)> {
    let user = auth.into_principal();
    let post_uuid = request.post_uuid.unwrap_or_default();

    let post_exists = state
        .repos
        .posts
        .exists(&post_uuid)
        .await
        .map_err(|e| Error::failed("Failed to create comment", e))?;
    if !post_exists {
        return Err(post_not_found());
    }

    let comment = Comment::new(request.content.unwrap_or_default(), user.uuid, post_uuid);

    state
        .repos
        .comments
        .create(&comment)
        .await
        .map_err(|e| Error::failed("Failed to create comment", e))?;

    let view = state
        .repos
        .comments
        .find_view(&comment.comment_id)
        .await
        .map_err(|e| Error::failed("Failed to create comment", e))?
        .ok_or_else(|| {
            Error::failed("Failed to create comment", "comment vanished after insert")
        })?;

    tracing::info!(
        comment_id = %comment.comment_id,
        post_uuid = %comment.post_uuid,
        user_uuid = %comment.user_uuid,
        "Comment created"
    );

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(CommentResponse { comment: view })),
    ))
}

/// Comments on a post, oldest first
///
/// **GET /api/posts/{post_uuid}/comments**
pub async fn list_post_comments(
    State(state): State<PostsState>,
    PostUuid(post_uuid): PostUuid,
) -> Result<Json<Envelope<CommentListResponse<CommentView>>>> {
    let post_exists = state
        .repos
        .posts
        .exists(&post_uuid)
        .await
        .map_err(|e| Error::failed("Failed to get comments", e))?;
    if !post_exists {
        return Err(post_not_found());
    }

    let comments = state
        .repos
        .comments
        .list_by_post(&post_uuid)
        .await
        .map_err(|e| Error::failed("Failed to get comments", e))?;

    Ok(Json(Envelope::ok(CommentListResponse { comments })))
}

/// The caller's comments, newest first, with post titles
///
/// **GET /api/comments/my**
pub async fn my_comments(
    auth: AuthUser<MyCommentsPrompt>,
    State(state): State<PostsState>,
) -> Result<Json<Envelope<CommentListResponse<UserCommentView>>>> {
    let comments = state
        .repos
        .comments
        .list_by_user(&auth.principal.uuid)
        .await
        .map_err(|e| Error::failed("Failed to get your comments", e))?;

    Ok(Json(Envelope::ok(CommentListResponse { comments })))
}
