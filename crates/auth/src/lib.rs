//! Session authentication for the XSS Lab API
//!
//! Provides the HS256 token codec, cookie transport, and axum extractors
//! that work with any domain state implementing `FromRef<S>` for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod cookie;
mod error;
mod extractors;
pub mod jwt;
mod principal;

pub use backend::AuthBackend;
pub use claims::{SessionClaims, SESSION_TTL_SECONDS};
pub use config::AuthConfig;
pub use cookie::{clear_session_cookie, read_cookie, session_cookie, AUTH_COOKIE};
pub use error::AuthError;
pub use extractors::{AuthPrompt, AuthUser, MaybeAuth, Unauthorized};
pub use principal::Principal;
