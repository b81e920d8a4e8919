//! Health check handlers
//!
//! - GET /api/health - Overall status with per-service breakdown
//! - GET /api/health/db - Database round trip
//! - GET /api/health/db/detailed - Database round trip plus table counts

use std::{collections::BTreeMap, time::Instant};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;
use xsslab_common::{Envelope, Error, Result};

use crate::AppState;

const PROBED_TABLES: [&str; 3] = ["users", "posts", "comments"];

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: &'static str,
    pub connected: bool,
    #[serde(rename = "responseTime")]
    pub response_time: String,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealthResponse {
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct TableHealth {
    pub exists: bool,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct DetailedDatabase {
    pub status: &'static str,
    pub connected: bool,
    #[serde(rename = "responseTime")]
    pub response_time: String,
    pub tables: BTreeMap<&'static str, TableHealth>,
    #[serde(rename = "tablesError", skip_serializing_if = "Option::is_none")]
    pub tables_error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub timestamp: String,
    pub database: DetailedDatabase,
}

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    #[serde(rename = "responseTime", skip_serializing_if = "Option::is_none")]
    pub response_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Services {
    pub database: ServiceHealth,
    pub api: ServiceHealth,
}

#[derive(Debug, Serialize)]
pub struct FullHealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub timestamp: String,
    pub version: String,
    pub environment: String,
    pub services: Services,
}

fn elapsed_ms(started: Instant) -> String {
    format!("{}ms", started.elapsed().as_millis())
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// `SELECT 1`; returns the round-trip time
async fn ping(pool: &SqlitePool) -> std::result::Result<(i64, String), sqlx::Error> {
    let started = Instant::now();
    let (value,): (i64,) = sqlx::query_as("SELECT 1 AS test").fetch_one(pool).await?;
    Ok((value, elapsed_ms(started)))
}

async fn count_rows(pool: &SqlitePool, table: &str) -> std::result::Result<i64, sqlx::Error> {
    // Table names come from PROBED_TABLES, never from the request
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) AS count FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn connection_failed(e: impl std::fmt::Display) -> Error {
    Error::Unavailable {
        message: "Database connection failed".to_string(),
        detail: e.to_string(),
    }
}

/// Database round trip
///
/// **GET /api/health/db**
pub async fn database_health(
    State(state): State<AppState>,
) -> Result<Json<Envelope<DatabaseHealthResponse>>> {
    let (value, response_time) = ping(&state.pool).await.map_err(|e| {
        tracing::error!(error = %e, "Database health check failed");
        connection_failed(e)
    })?;

    if value != 1 {
        return Err(Error::Unavailable {
            message: "Database connection test failed".to_string(),
            detail: "Unexpected query result".to_string(),
        });
    }

    Ok(Json(Envelope::ok(DatabaseHealthResponse {
        database: DatabaseHealth {
            status: "healthy",
            connected: true,
            response_time,
            message: "Database connection is working properly",
        },
    })))
}

/// Database round trip plus row counts for each table
///
/// **GET /api/health/db/detailed**
///
/// A failing table probe reports `degraded` with 200; only a failed
/// connection is a 503.
pub async fn detailed_database_health(
    State(state): State<AppState>,
) -> Result<Json<Envelope<DetailedHealthResponse>>> {
    let (_, response_time) = ping(&state.pool).await.map_err(|e| {
        tracing::error!(error = %e, "Database health check failed");
        connection_failed(e)
    })?;

    let mut tables = BTreeMap::new();
    let mut tables_error = None;
    for table in PROBED_TABLES {
        match count_rows(&state.pool, table).await {
            Ok(count) => {
                tables.insert(
                    table,
                    TableHealth {
                        exists: true,
                        count,
                    },
                );
            }
            Err(e) => {
                tracing::warn!(table, error = %e, "Table probe failed");
                tables_error = Some(e.to_string());
                break;
            }
        }
    }

    let status = if tables_error.is_some() {
        "degraded"
    } else {
        "healthy"
    };

    Ok(Json(Envelope::ok(DetailedHealthResponse {
        timestamp: now_rfc3339(),
        database: DetailedDatabase {
            status,
            connected: true,
            response_time,
            tables,
            tables_error,
        },
    })))
}

/// Overall health
///
/// **GET /api/health**
///
/// 200 when every service is healthy, 503 otherwise.
pub async fn full_health(State(state): State<AppState>) -> (StatusCode, Json<FullHealthResponse>) {
    let database = match ping(&state.pool).await {
        Ok((_, response_time)) => ServiceHealth {
            status: "healthy",
            response_time: Some(response_time),
            error: None,
        },
        Err(e) => {
            tracing::error!(error = %e, "Database unreachable during health check");
            ServiceHealth {
                status: "unhealthy",
                response_time: None,
                error: Some(e.to_string()),
            }
        }
    };

    let healthy = database.status == "healthy";
    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = FullHealthResponse {
        success: healthy,
        status: if healthy { "healthy" } else { "degraded" },
        timestamp: now_rfc3339(),
        version: state.api_version.clone(),
        environment: state.environment.clone(),
        services: Services {
            database,
            api: ServiceHealth {
                status: "healthy",
                response_time: None,
                error: None,
            },
        },
    };

    (status_code, Json(body))
}

/// Create health check routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(full_health))
        .route("/api/health/db", get(database_health))
        .route("/api/health/db/detailed", get(detailed_database_health))
}
