//! Custom axum extractors

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};

use crate::validation::Validate;
use crate::Error;

/// Default page size for list endpoints
const DEFAULT_LIMIT: i64 = 20;

/// Pagination query parameters for list endpoints.
///
/// Each value is read by its leading integer and otherwise passed through to
/// the store untouched; a value with no leading integer falls back to the
/// default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
}

impl Pagination {
    /// Get the limit, defaulting to 20
    pub fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    /// Get the offset, defaulting to 0
    pub fn offset(&self) -> i64 {
        parse_or(self.offset.as_deref(), 0)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_integer).unwrap_or(default)
}

/// Integer prefix of `raw` after leading whitespace: `"5abc"` is 5, `"abc"` is none.
fn leading_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let value: i64 = rest[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Query string extractor that keeps the first value of a repeated key.
///
/// `?limit=1&limit=2` reads as `limit=1`. A query string that cannot be
/// decoded at all is a 400 in the error envelope.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|e| Error::Validation(format!("Invalid query string: {}", e.body_text())))?;

        let mut first = Map::new();
        for (key, value) in pairs {
            first.entry(key).or_insert(Value::String(value));
        }

        let params = serde_json::from_value(Value::Object(first))
            .map_err(|e| Error::Validation(format!("Invalid query string: {e}")))?;
        Ok(QueryParams(params))
    }
}

/// JSON extractor that runs the body's [`Validate`] rules automatically.
///
/// All input errors (deserialization + validation) return 400 with the
/// validation messages joined by `; `.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for `ValidatedJson`
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    Json(JsonRejection),
    Validation(Error),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            ValidatedJsonRejection::Json(e) => {
                tracing::debug!(error = %e, "Rejected request body");
                Error::Validation(format!("Invalid request body: {}", e.body_text()))
                    .into_response()
            }
            ValidatedJsonRejection::Validation(e) => e.into_response(),
        }
    }
}

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::Json)?;
        value
            .validate()
            .into_result()
            .map_err(ValidatedJsonRejection::Validation)?;
        Ok(ValidatedJson(value))
    }
}
