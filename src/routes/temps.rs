//! Temperature aggregate HTTP endpoints.
//!
//! - GET /api/v1.0/start/:start
//! - GET /api/v1.0/startend/:start/:end
//!
//! Both return one element per distinct date in range, aggregated across
//! all stations reporting on that date.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::{models, queries};
use crate::errors::{AppError, ErrorResponse};
use crate::services::climate;

use super::AppState;

/// Per-date temperature summary across all reporting stations.
#[derive(Debug, Serialize, ToSchema)]
pub struct TempSummaryResponse {
    /// Observation date (YYYY-MM-DD)
    #[serde(rename = "Date")]
    pub date: String,
    /// Minimum observed temperature
    #[serde(rename = "Low Temp")]
    pub low_temp: f64,
    /// Mean observed temperature
    #[serde(rename = "Avg Temp")]
    pub avg_temp: f64,
    /// Maximum observed temperature
    #[serde(rename = "High Temp")]
    pub high_temp: f64,
}

impl From<models::DailyTempSummary> for TempSummaryResponse {
    fn from(s: models::DailyTempSummary) -> Self {
        Self {
            date: s.date,
            low_temp: s.tmin,
            avg_temp: s.tavg,
            high_temp: s.tmax,
        }
    }
}

/// Reject parameters that are not shaped like `YYYY-MM-DD` before any
/// query is issued.
fn validated_date(raw: String) -> Result<String, AppError> {
    if climate::is_iso_date_shaped(&raw) {
        Ok(raw)
    } else {
        Err(AppError::BadRequest(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            raw
        )))
    }
}

/// Daily temperature summaries for all dates at or after `start`.
#[utoipa::path(
    get,
    path = "/api/v1.0/start/{start}",
    tag = "Temperature",
    params(
        ("start" = String, Path, description = "Start date (YYYY-MM-DD), inclusive"),
    ),
    responses(
        (status = 200, description = "Per-date min/avg/max temperature", body = Vec<TempSummaryResponse>),
        (status = 400, description = "Malformed start date", body = ErrorResponse),
    )
)]
pub async fn temps_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TempSummaryResponse>>, AppError> {
    let start = validated_date(start)?;
    let rows = queries::temperature_summary(&state.pool, &start, None).await?;
    let items: Vec<TempSummaryResponse> = rows.into_iter().map(TempSummaryResponse::from).collect();
    Ok(Json(items))
}

/// Daily temperature summaries for all dates within `[start, end]`.
#[utoipa::path(
    get,
    path = "/api/v1.0/startend/{start}/{end}",
    tag = "Temperature",
    params(
        ("start" = String, Path, description = "Start date (YYYY-MM-DD), inclusive"),
        ("end" = String, Path, description = "End date (YYYY-MM-DD), inclusive"),
    ),
    responses(
        (status = 200, description = "Per-date min/avg/max temperature", body = Vec<TempSummaryResponse>),
        (status = 400, description = "Malformed start or end date", body = ErrorResponse),
    )
)]
pub async fn temps_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TempSummaryResponse>>, AppError> {
    let start = validated_date(start)?;
    let end = validated_date(end)?;
    let rows = queries::temperature_summary(&state.pool, &start, Some(&end)).await?;
    let items: Vec<TempSummaryResponse> = rows.into_iter().map(TempSummaryResponse::from).collect();
    Ok(Json(items))
}
