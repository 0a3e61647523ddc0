use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" when healthy, "degraded" when the dataset is unreachable)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether the dataset is reachable
    pub database: bool,
}

/// Health check endpoint.
///
/// Verifies dataset connectivity with a trivial query. Reports "degraded"
/// (still 200) when the database is unreachable so load balancers can
/// distinguish partial failures from a dead process.
#[utoipa::path(
    get,
    path = "/api/v1.0/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();

    Json(HealthResponse {
        status: if db_ok {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_ok,
    })
}
