//! Station HTTP endpoints.
//!
//! - GET /api/v1.0/stations — station codes only
//! - GET /api/v1.0/stations/details — full station metadata

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::db::{models, queries};
use crate::errors::AppError;

use super::AppState;

/// Full station metadata for GET /api/v1.0/stations/details.
#[derive(Debug, Serialize, ToSchema)]
pub struct StationResponse {
    /// Row identifier in the station table
    pub id: i64,
    /// Unique station code (e.g. "USC00519397")
    pub station: String,
    /// Display name, typically place and network qualifier
    pub name: String,
    /// Latitude (WGS84)
    pub latitude: f64,
    /// Longitude (WGS84)
    pub longitude: f64,
    /// Elevation in feet above sea level
    pub elevation: f64,
}

impl From<models::Station> for StationResponse {
    fn from(s: models::Station) -> Self {
        Self {
            id: s.id,
            station: s.station,
            name: s.name,
            latitude: s.latitude,
            longitude: s.longitude,
            elevation: s.elevation,
        }
    }
}

/// List the codes of all known stations.
#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    tag = "Stations",
    responses(
        (status = 200, description = "Station codes", body = Vec<String>),
    )
)]
pub async fn list_station_names(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, AppError> {
    let names = queries::station_names(&state.pool).await?;
    Ok(Json(names))
}

/// List all stations with full metadata.
#[utoipa::path(
    get,
    path = "/api/v1.0/stations/details",
    tag = "Stations",
    responses(
        (status = 200, description = "Stations with position and elevation", body = Vec<StationResponse>),
    )
)]
pub async fn list_station_details(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationResponse>>, AppError> {
    let stations = queries::list_stations(&state.pool).await?;
    let items: Vec<StationResponse> = stations.into_iter().map(StationResponse::from).collect();
    Ok(Json(items))
}
