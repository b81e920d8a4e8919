//! Account entities

use serde::Serialize;
use uuid::Uuid;
use xsslab_common::{hash_password, verify_password};

/// A registered user as stored
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub uuid: String,
    pub username: String,
    /// Password digest, never the plain password
    pub password: String,
    pub name: String,
    pub time_create: i64,
    pub last_login: Option<i64>,
}

impl User {
    /// New user with a fresh uuid; `password` is hashed here
    pub fn new(username: impl Into<String>, password: &str, name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            username: username.into(),
            password: hash_password(password),
            name: name.into(),
            time_create: chrono::Utc::now().timestamp(),
            last_login: None,
        }
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.password)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            uuid: self.uuid.clone(),
            username: self.username.clone(),
            name: self.name.clone(),
        }
    }
}

/// Public view of a user returned by register and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub uuid: String,
    pub username: String,
    pub name: String,
}
