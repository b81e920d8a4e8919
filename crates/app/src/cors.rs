//! CORS policy
//!
//! The allow-list is a comma-separated string that may mix `*` with explicit
//! origins. For each request exactly one origin is echoed back, and
//! credentials are advertised only alongside a concrete origin.
//!
//! Resolution, first match wins:
//! 1. `*` only: echo `*`, no credentials.
//! 2. `*` plus explicit origins, request has an Origin: echo it.
//! 3. `*` plus explicit origins, no Origin: echo the first explicit origin.
//! 4. No `*`, Origin is listed: echo it.
//! 5. Otherwise: echo the first explicit origin, or `*` when there is none.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
            ORIGIN,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

const WILDCARD: &str = "*";
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization, Cookie";
/// Preflight cache lifetime: 24 hours
const PREFLIGHT_MAX_AGE: &str = "86400";

/// Parsed allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    wildcard: bool,
    origins: Vec<String>,
}

/// Origin to echo and whether to advertise credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsDecision {
    pub origin: String,
    pub allow_credentials: bool,
}

impl CorsPolicy {
    pub fn parse(configured: &str) -> Self {
        let mut wildcard = false;
        let mut origins = Vec::new();

        for entry in configured.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if entry == WILDCARD {
                wildcard = true;
            } else if !origins.iter().any(|o| o == entry) {
                origins.push(entry.to_string());
            }
        }

        Self { wildcard, origins }
    }

    pub fn resolve(&self, request_origin: Option<&str>) -> CorsDecision {
        let first = self.origins.first();

        match (self.wildcard, first, request_origin) {
            (true, None, _) => CorsDecision::anonymous(WILDCARD),
            (true, Some(_), Some(origin)) => CorsDecision::credentialed(origin),
            (true, Some(first), None) => CorsDecision::credentialed(first),
            (false, _, Some(origin)) if self.origins.iter().any(|o| o == origin) => {
                CorsDecision::credentialed(origin)
            }
            (false, Some(first), _) => CorsDecision::credentialed(first),
            (false, None, _) => CorsDecision::anonymous(WILDCARD),
        }
    }
}

/// Resolve the CORS decision for one request against a raw allow-list
pub fn resolve(request_origin: Option<&str>, configured: &str) -> CorsDecision {
    CorsPolicy::parse(configured).resolve(request_origin)
}

impl CorsDecision {
    fn anonymous(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            allow_credentials: false,
        }
    }

    fn credentialed(origin: &str) -> Self {
        Self {
            allow_credentials: origin != WILDCARD,
            origin: origin.to_string(),
        }
    }

    /// Stamp the CORS headers onto a response
    pub fn apply(&self, headers: &mut HeaderMap, preflight: bool) {
        match HeaderValue::from_str(&self.origin) {
            Ok(origin) => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            }
            Err(e) => {
                tracing::warn!(origin = %self.origin, error = %e, "Unusable CORS origin");
            }
        }
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        if self.allow_credentials {
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        if preflight {
            headers.insert(
                ACCESS_CONTROL_MAX_AGE,
                HeaderValue::from_static(PREFLIGHT_MAX_AGE),
            );
        }
    }
}

/// Answers every `OPTIONS` request as a preflight before routing, and stamps
/// CORS headers on every other response.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let request_origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string);
    let decision = policy.resolve(request_origin.as_deref());

    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        decision.apply(response.headers_mut(), true);
        return response;
    }

    let mut response = next.run(request).await;
    decision.apply(response.headers_mut(), false);
    response
}
