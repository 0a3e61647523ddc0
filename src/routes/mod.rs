pub mod health;
pub mod home;
pub mod observations;
pub mod stations;
pub mod temps;

use axum::routing::get;
use axum::Router;
use chrono::NaiveDate;
use sqlx::SqlitePool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Anchor for the default trailing-year window: the maximum observation
    /// date, computed once at startup and immutable for the life of the
    /// process. A dataset refreshed underneath a running server keeps the
    /// old anchor until restart.
    pub latest_date: NaiveDate,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/api/v1.0/precipitation", get(observations::precipitation))
        .route("/api/v1.0/stations", get(stations::list_station_names))
        .route(
            "/api/v1.0/stations/details",
            get(stations::list_station_details),
        )
        .route("/api/v1.0/temperature", get(observations::temperature))
        .route("/api/v1.0/start/:start", get(temps::temps_from))
        .route("/api/v1.0/startend/:start/:end", get(temps::temps_between))
        .route("/api/v1.0/health", get(health::health_check))
        .with_state(state)
}
