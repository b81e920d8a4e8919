//! Comment repository

use crate::domain::entities::{Comment, CommentView, UserCommentView};
use sqlx::SqlitePool;
use xsslab_common::RepositoryError;

#[derive(Clone)]
pub struct CommentRepository {
    pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a comment. The post is not re-checked here.
    pub async fn create(&self, comment: &Comment) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO comments (comment_id, content, user_uuid, post_uuid)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&comment.comment_id)
        .bind(&comment.content)
        .bind(&comment.user_uuid)
        .bind(&comment.post_uuid)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a comment with its author
    pub async fn find_view(
        &self,
        comment_id: &str,
    ) -> Result<Option<CommentView>, RepositoryError> {
        let comment = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.comment_id, c.content, c.user_uuid, c.post_uuid,
                   u.username, u.name AS user_name
            FROM comments c
            JOIN users u ON c.user_uuid = u.uuid
            WHERE c.comment_id = ?
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Comments on a post, oldest first
    pub async fn list_by_post(&self, post_uuid: &str) -> Result<Vec<CommentView>, RepositoryError> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT c.comment_id, c.content, c.user_uuid, c.post_uuid,
                   u.username, u.name AS user_name
            FROM comments c
            JOIN users u ON c.user_uuid = u.uuid
            WHERE c.post_uuid = ?
            ORDER BY c.comment_id ASC
            "#,
        )
        .bind(post_uuid)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Comments written by a user, newest first, with the post title
    pub async fn list_by_user(
        &self,
        user_uuid: &str,
    ) -> Result<Vec<UserCommentView>, RepositoryError> {
        let comments = sqlx::query_as::<_, UserCommentView>(
            r#"
            SELECT c.comment_id, c.content, c.user_uuid, c.post_uuid,
                   u.username, u.name AS user_name, p.title AS post_title
            FROM comments c
            JOIN users u ON c.user_uuid = u.uuid
            JOIN posts p ON c.post_uuid = p.post_uuid
            WHERE c.user_uuid = ?
            ORDER BY c.comment_id DESC
            "#,
        )
        .bind(user_uuid)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
