//! XSS Lab API composition root
//!
//! Composes the domain routers, the health checks and the CORS layer into a
//! single application.

pub mod cors;
pub mod health;

use std::{str::FromStr, sync::Arc};

use axum::{extract::State, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use xsslab_accounts::AccountsState;
use xsslab_auth::{AuthBackend, AuthConfig};
use xsslab_common::{AppConfig, Error};
use xsslab_posts::PostsState;

use crate::cors::CorsPolicy;

/// State for the routes owned by the composition root
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub api_version: String,
    pub environment: String,
}

/// Open the database (creating the file if needed) and apply migrations
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, anyhow::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    Ok(pool)
}

/// Create the main application router with all routes and middleware
pub fn create_app(config: &AppConfig, pool: SqlitePool) -> Router {
    let auth = AuthBackend::new(AuthConfig::from(config));

    let accounts_state = AccountsState::new(pool.clone(), auth.clone());
    let posts_state = PostsState::new(pool.clone(), auth);
    let app_state = AppState {
        pool,
        api_version: config.api_version.clone(),
        environment: config.environment.clone(),
    };

    if config.lab_reset_endpoint {
        tracing::warn!("Lab reset endpoint enabled: DELETE /api/posts wipes all content");
    }

    let cors_policy = Arc::new(CorsPolicy::parse(&config.cors_origin));

    Router::new()
        .route("/", get(api_metadata))
        .merge(health::routes())
        .with_state(app_state)
        .merge(xsslab_accounts::routes().with_state(accounts_state))
        .merge(xsslab_posts::routes(config.lab_reset_endpoint).with_state(posts_state))
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(endpoint_not_found)
        .layer(middleware::from_fn_with_state(
            cors_policy,
            cors::cors_middleware,
        ))
}

/// Unknown path, or known path with an unsupported method
async fn endpoint_not_found() -> Error {
    Error::NotFound("Endpoint not found".to_string())
}

/// API metadata and endpoint map
///
/// **GET /**
async fn api_metadata(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "XSS Lab API is running",
        "version": state.api_version,
        "environment": state.environment,
        "endpoints": {
            "auth": {
                "register": "POST /api/auth/register",
                "login": "POST /api/auth/login",
                "logout": "POST /api/auth/logout"
            },
            "posts": {
                "create": "POST /api/posts",
                "getAll": "GET /api/posts",
                "getMy": "GET /api/posts/my",
                "search": "GET /api/posts/search?q=...",
                "getOne": "GET /api/posts/:post_uuid"
            },
            "comments": {
                "create": "POST /api/comments",
                "getByPost": "GET /api/posts/:post_uuid/comments",
                "getMy": "GET /api/comments/my"
            },
            "health": {
                "full": "GET /api/health",
                "database": "GET /api/health/db",
                "databaseDetailed": "GET /api/health/db/detailed"
            }
        }
    }))
}
