//! Stateless session backend
//!
//! Issues and verifies session tokens and renders the cookie that carries
//! them. No server-side session state: a principal is rebuilt from the
//! token signature on every request.
//!
//! Domain states expose this via `FromRef`:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::claims::SessionClaims;
use crate::config::AuthConfig;
use crate::cookie::{clear_session_cookie, read_cookie, session_cookie, AUTH_COOKIE};
use crate::error::AuthError;
use crate::jwt;
use crate::principal::Principal;

#[derive(Debug, Clone)]
pub struct AuthBackend {
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Sign a session token for a user, valid from now
    pub fn issue_token(&self, uuid: &str, username: &str) -> Result<String, AuthError> {
        let claims = SessionClaims::new(
            uuid,
            username,
            chrono::Utc::now().timestamp(),
            self.config.session_ttl_seconds,
        );
        jwt::sign(&claims, &self.config.jwt_secret)
    }

    /// `Set-Cookie` value for a freshly issued token
    pub fn session_cookie(&self, token: &str) -> String {
        session_cookie(
            token,
            self.config.session_ttl_seconds,
            self.config.same_site,
        )
    }

    /// `Set-Cookie` value that ends the session
    pub fn clear_cookie(&self) -> String {
        clear_session_cookie(self.config.same_site)
    }

    /// Resolve the request's principal, if any.
    ///
    /// The `auth_token` cookie is tried first, then `Authorization: Bearer`.
    /// Missing, malformed and expired tokens all yield `None`.
    pub fn authenticate(&self, headers: &HeaderMap) -> Option<Principal> {
        let from_cookie = read_cookie(headers, AUTH_COOKIE);
        let from_header = bearer_token(headers);

        [from_cookie, from_header]
            .into_iter()
            .flatten()
            .find_map(|token| jwt::verify::<SessionClaims>(&token, &self.config.jwt_secret))
            .map(Principal::from)
    }
}

/// Token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}
