//! Post repository

use crate::domain::entities::{Post, PostView};
use sqlx::SqlitePool;
use xsslab_common::RepositoryError;

/// Shared projection: a post joined with its author's username and name
const POST_VIEW_SELECT: &str = r#"
    SELECT p.post_uuid, p.title, p.content, p.time_create, p.user_uuid,
           u.username, u.name AS user_name
    FROM posts p
    JOIN users u ON p.user_uuid = u.uuid
"#;

#[derive(Clone)]
pub struct PostRepository {
    pool: SqlitePool,
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a post
    pub async fn create(&self, post: &Post) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO posts (post_uuid, title, content, time_create, user_uuid)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&post.post_uuid)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.time_create)
        .bind(&post.user_uuid)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a post with its author
    pub async fn find_view(&self, post_uuid: &str) -> Result<Option<PostView>, RepositoryError> {
        let sql = format!("{POST_VIEW_SELECT} WHERE p.post_uuid = ?");
        let post = sqlx::query_as::<_, PostView>(&sql)
            .bind(post_uuid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    /// Whether a post exists
    pub async fn exists(&self, post_uuid: &str) -> Result<bool, RepositoryError> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT post_uuid FROM posts WHERE post_uuid = ?")
                .bind(post_uuid)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Newest posts first
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<PostView>, RepositoryError> {
        let sql = format!("{POST_VIEW_SELECT} ORDER BY p.time_create DESC LIMIT ? OFFSET ?");
        let posts = sqlx::query_as::<_, PostView>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    /// Newest posts by one author first
    pub async fn list_by_user(
        &self,
        user_uuid: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostView>, RepositoryError> {
        let sql = format!(
            "{POST_VIEW_SELECT} WHERE p.user_uuid = ? ORDER BY p.time_create DESC LIMIT ? OFFSET ?"
        );
        let posts = sqlx::query_as::<_, PostView>(&sql)
            .bind(user_uuid)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    /// Substring match over title and content.
    ///
    /// The query is wrapped as `%query%`; `%` and `_` inside it keep their
    /// LIKE meaning. Case folding follows SQLite's LIKE (ASCII-insensitive).
    pub async fn search(
        &self,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostView>, RepositoryError> {
        let pattern = format!("%{query}%");
        let sql = format!(
            "{POST_VIEW_SELECT} WHERE p.title LIKE ? OR p.content LIKE ? \
             ORDER BY p.time_create DESC LIMIT ? OFFSET ?"
        );
        let posts = sqlx::query_as::<_, PostView>(&sql)
            .bind(&pattern)
            .bind(&pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    /// Delete every comment and post. Returns the number of posts removed.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        // Comments reference posts, so they go first
        sqlx::query("DELETE FROM comments")
            .execute(&self.pool)
            .await?;
        let deleted = sqlx::query("DELETE FROM posts")
            .execute(&self.pool)
            .await?;

        Ok(deleted.rows_affected())
    }
}
