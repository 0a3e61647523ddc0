//! Root route: a human-readable listing of the available endpoints.

use axum::response::Html;

/// List the available routes.
#[utoipa::path(
    get,
    path = "/",
    tag = "Home",
    responses(
        (status = 200, description = "Available routes", content_type = "text/html", body = String),
    )
)]
pub async fn index() -> Html<&'static str> {
    Html(
        "Available Routes:<br/>\
         /api/v1.0/precipitation<br/>\
         /api/v1.0/stations<br/>\
         /api/v1.0/stations/details<br/>\
         /api/v1.0/temperature<br/>\
         /api/v1.0/start/&lt;start&gt;<br/>\
         /api/v1.0/startend/&lt;start&gt;/&lt;end&gt;<br/>\
         /api/v1.0/health",
    )
}
