//! Session cookie transport

use axum::http::{header::COOKIE, HeaderMap};
use xsslab_common::SameSitePolicy;

/// Name of the session cookie
pub const AUTH_COOKIE: &str = "auth_token";

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str, max_age: i64, same_site: SameSitePolicy) -> String {
    cookie_line(token, max_age, same_site)
}

/// `Set-Cookie` value that clears the session.
///
/// Attributes must match the ones used when the cookie was set, or browsers
/// keep the old cookie around.
pub fn clear_session_cookie(same_site: SameSitePolicy) -> String {
    cookie_line("", 0, same_site)
}

fn cookie_line(value: &str, max_age: i64, same_site: SameSitePolicy) -> String {
    let mut line =
        format!("{AUTH_COOKIE}={value}; Max-Age={max_age}; Path=/; HttpOnly; SameSite={same_site}");
    if same_site.requires_secure() {
        line.push_str("; Secure");
    }
    line
}

/// Value of cookie `name` across all `Cookie` headers, if present and non-empty
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
