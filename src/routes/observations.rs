//! Observation listing HTTP endpoints.
//!
//! - GET /api/v1.0/precipitation
//! - GET /api/v1.0/temperature
//!
//! Both return the trailing year of raw per-(station, date) observations,
//! anchored to the latest recorded date rather than wall-clock time.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::db::queries::{self, ObservationField};
use crate::errors::AppError;
use crate::services::climate;

use super::AppState;

/// One observation: the observation date as key mapped to the measured
/// value (or null), plus a `Station` key carrying the reporting station code.
#[derive(Debug, Serialize, ToSchema)]
#[schema(value_type = Object)]
pub struct ObservationEntry(pub Map<String, Value>);

async fn list_observations(
    state: &AppState,
    field: ObservationField,
) -> Result<Json<Vec<ObservationEntry>>, AppError> {
    let start = climate::default_window_start(state.latest_date)
        .format("%Y-%m-%d")
        .to_string();
    let rows = queries::measurements_in_range(&state.pool, field, &start, None).await?;
    let entries = climate::shape_observations(rows)
        .into_iter()
        .map(ObservationEntry)
        .collect();
    Ok(Json(entries))
}

/// Precipitation readings for the trailing year.
#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    tag = "Observations",
    responses(
        (status = 200, description = "One entry per (station, date) precipitation reading", body = Vec<ObservationEntry>),
    )
)]
pub async fn precipitation(
    State(state): State<AppState>,
) -> Result<Json<Vec<ObservationEntry>>, AppError> {
    list_observations(&state, ObservationField::Precipitation).await
}

/// Observed temperatures for the trailing year.
#[utoipa::path(
    get,
    path = "/api/v1.0/temperature",
    tag = "Observations",
    responses(
        (status = 200, description = "One entry per (station, date) temperature reading", body = Vec<ObservationEntry>),
    )
)]
pub async fn temperature(
    State(state): State<AppState>,
) -> Result<Json<Vec<ObservationEntry>>, AppError> {
    list_observations(&state, ObservationField::Temperature).await
}
