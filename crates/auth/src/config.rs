//! Authentication configuration

use xsslab_common::{AppConfig, SameSitePolicy};

use crate::claims::SESSION_TTL_SECONDS;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub same_site: SameSitePolicy,
    pub session_ttl_seconds: i64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            same_site: SameSitePolicy::default(),
            session_ttl_seconds: SESSION_TTL_SECONDS,
        }
    }

    pub fn with_same_site(mut self, same_site: SameSitePolicy) -> Self {
        self.same_site = same_site;
        self
    }
}

impl From<&AppConfig> for AuthConfig {
    fn from(config: &AppConfig) -> Self {
        Self::new(config.jwt_secret.clone()).with_same_site(config.cookie_same_site)
    }
}
