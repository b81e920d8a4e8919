//! Path parameter extraction
//!
//! Resource ids in paths are limited to `[a-zA-Z0-9-]+`. Anything else is
//! treated as an unknown route, not as a missing resource.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use lazy_static::lazy_static;
use regex::Regex;
use xsslab_common::Error;

lazy_static! {
    static ref RESOURCE_ID_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9-]+$").unwrap();
}

/// `{post_uuid}` path segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUuid(pub String);

impl<S> FromRequestParts<S> for PostUuid
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| endpoint_not_found())?;

        if !is_resource_id(&raw) {
            return Err(endpoint_not_found());
        }

        Ok(PostUuid(raw))
    }
}

pub fn is_resource_id(raw: &str) -> bool {
    RESOURCE_ID_REGEX.is_match(raw)
}

fn endpoint_not_found() -> Error {
    Error::NotFound("Endpoint not found".to_string())
}
