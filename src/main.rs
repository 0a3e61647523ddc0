use std::net::SocketAddr;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod db;
mod errors;
mod routes;
mod services;

use config::AppConfig;
use routes::AppState;

/// Maximum number of connections in the database pool.
const DB_POOL_MAX_CONNECTIONS: u32 = 5;
/// Minimum number of connections kept alive in the database pool.
const DB_POOL_MIN_CONNECTIONS: u32 = 2;

/// Climate API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Climate API",
        version = "0.1.0",
        description = "Read-only JSON API over the Hawaii daily climate observation \
            dataset. Serves raw precipitation and temperature observations for the \
            trailing year before the latest recorded date, per-date min/avg/max \
            temperature aggregates for arbitrary date ranges, and station metadata.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Home", description = "Route listing"),
        (name = "Observations", description = "Raw precipitation and temperature readings"),
        (name = "Stations", description = "Weather station metadata"),
        (name = "Temperature", description = "Per-date temperature aggregates"),
        (name = "Health", description = "Service health check"),
    ),
    paths(
        routes::home::index,
        routes::observations::precipitation,
        routes::observations::temperature,
        routes::stations::list_station_names,
        routes::stations::list_station_details,
        routes::temps::temps_from,
        routes::temps::temps_between,
        routes::health::health_check,
    ),
    components(
        schemas(
            routes::observations::ObservationEntry,
            routes::stations::StationResponse,
            routes::temps::TempSummaryResponse,
            routes::health::HealthResponse,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climate_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // The dataset is pre-populated and never written; open it read-only.
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .expect("DATABASE_URL must be a valid sqlite connection string")
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(DB_POOL_MAX_CONNECTIONS)
        .min_connections(DB_POOL_MIN_CONNECTIONS)
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to database");

    // Anchor for the default trailing-year window, computed once. An empty
    // measurement table means no window can ever be computed, so refuse to
    // start serving.
    let latest_date = db::queries::latest_date(&pool)
        .await
        .expect("Failed to read latest observation date")
        .expect("Measurement table is empty; no anchor for the default window");

    tracing::info!("Latest recorded observation date: {}", latest_date);

    let state = AppState { pool, latest_date };

    // CORS — read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
