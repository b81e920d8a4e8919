//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at process
//! start and handed to every component that needs it.

use anyhow::Result;
use std::env;
use std::fmt;
use std::str::FromStr;

/// `SameSite` attribute for the session cookie.
///
/// `Lax` suits same-site development; cross-site deployments need `None`,
/// which browsers only accept together with `Secure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSitePolicy {
    #[default]
    Lax,
    Strict,
    None,
}

impl SameSitePolicy {
    /// Whether the cookie must also carry the `Secure` attribute
    pub fn requires_secure(&self) -> bool {
        matches!(self, SameSitePolicy::None)
    }
}

impl fmt::Display for SameSitePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSitePolicy::Lax => write!(f, "Lax"),
            SameSitePolicy::Strict => write!(f, "Strict"),
            SameSitePolicy::None => write!(f, "None"),
        }
    }
}

impl FromStr for SameSitePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSitePolicy::Lax),
            "strict" => Ok(SameSitePolicy::Strict),
            "none" => Ok(SameSitePolicy::None),
            other => Err(anyhow::anyhow!(
                "COOKIE_SAME_SITE must be one of lax, strict, none (got {other:?})"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL (SQLite)
    pub database_url: String,

    /// HMAC secret for session tokens
    pub jwt_secret: String,

    /// Comma-separated CORS allow-list; `*` may be mixed with explicit origins
    pub cors_origin: String,

    /// Reported by `/` and `/api/health`
    pub api_version: String,
    pub environment: String,

    pub cookie_same_site: SameSitePolicy,

    /// Mounts the unauthenticated `DELETE /api/posts` lab reset route
    pub lab_reset_endpoint: bool,

    pub port: u16,
}

impl AppConfig {
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            cors_origin: "*".to_string(),
            api_version: "1.0.0".to_string(),
            environment: "development".to_string(),
            cookie_same_site: SameSitePolicy::default(),
            lab_reset_endpoint: false,
            port: 8787,
        }
    }

    pub fn with_cors_origin(mut self, cors_origin: impl Into<String>) -> Self {
        self.cors_origin = cors_origin.into();
        self
    }

    pub fn with_cookie_same_site(mut self, policy: SameSitePolicy) -> Self {
        self.cookie_same_site = policy;
        self
    }

    pub fn with_lab_reset_endpoint(mut self, enabled: bool) -> Self {
        self.lab_reset_endpoint = enabled;
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow::anyhow!("{name} is required"))
        };

        let cookie_same_site = match lookup("COOKIE_SAME_SITE") {
            Some(value) => value.parse()?,
            None => SameSitePolicy::default(),
        };

        let lab_reset_endpoint = lookup("LAB_RESET_ENDPOINT")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            cors_origin: lookup("CORS_ORIGIN").unwrap_or_else(|| "*".to_string()),
            api_version: lookup("API_VERSION").unwrap_or_else(|| "1.0.0".to_string()),
            environment: lookup("NODE_ENV").unwrap_or_else(|| "development".to_string()),
            cookie_same_site,
            lab_reset_endpoint,
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8787),
        })
    }
}
