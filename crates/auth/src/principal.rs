//! Authenticated identity

use crate::claims::SessionClaims;

/// The identity behind a verified session token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub uuid: String,
    pub username: String,
}

impl From<SessionClaims> for Principal {
    fn from(claims: SessionClaims) -> Self {
        Self {
            uuid: claims.uuid,
            username: claims.username,
        }
    }
}
