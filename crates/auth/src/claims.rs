//! Session token claims

use serde::{Deserialize, Serialize};

/// Session lifetime: 7 days
pub const SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user uuid)
    pub uuid: String,
    pub username: String,
    /// Expires at (epoch seconds)
    pub exp: i64,
}

impl SessionClaims {
    /// Claims for `uuid`/`username` expiring `ttl_seconds` from `issued_at`
    pub fn new(
        uuid: impl Into<String>,
        username: impl Into<String>,
        issued_at: i64,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            username: username.into(),
            exp: issued_at + ttl_seconds,
        }
    }
}
