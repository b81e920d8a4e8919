//! User repository

use crate::domain::entities::User;
use sqlx::SqlitePool;
use xsslab_common::RepositoryError;

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT uuid, username, password, name, time_create, last_login
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a new user. A taken username reports `AlreadyExists`.
    pub async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (uuid, username, password, name, time_create)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.uuid)
        .bind(&user.username)
        .bind(&user.password)
        .bind(&user.name)
        .bind(user.time_create)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record a successful login
    pub async fn touch_last_login(&self, uuid: &str, at: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE users SET last_login = ? WHERE uuid = ?")
            .bind(at)
            .bind(uuid)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
