use axum::http::StatusCode;
use axum::response::IntoResponse;

pub const BANNER: &str = "Backend Running - AI Meeting Notes Summarizer";

/// GET the service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = String),
    )
)]
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, BANNER)
}

/// GET health status
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "API router is up and responding to requests", body = String),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
