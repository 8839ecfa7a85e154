use crate::controller::{health_check_controller, share_controller, summary_controller};
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Meeting Notes Relay API"
        ),
        paths(
            health_check_controller::index,
            health_check_controller::health_check,
            summary_controller::summarize,
            share_controller::share,
        ),
        components(
            schemas(
                domain::summary::SummarizeRequest,
                domain::summary::SummarizeResult,
                domain::share::ShareRequest,
                domain::share::Recipients,
                share_controller::ShareResponse,
                crate::error::ErrorBody,
            )
        ),
        tags(
            (name = "meeting_notes_relay", description = "Meeting transcript summarization and sharing API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(summary_routes(app_state.clone()))
        .merge(share_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
}

fn health_routes() -> Router {
    Router::new()
        .route("/", get(health_check_controller::index))
        .route("/health", get(health_check_controller::health_check))
}

fn summary_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/summarize", post(summary_controller::summarize))
        .with_state(app_state)
}

fn share_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/share", post(share_controller::share))
        .with_state(app_state)
}
