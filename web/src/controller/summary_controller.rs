use crate::controller::json_rejection_error;
use crate::error::ErrorBody;
use crate::{AppState, Error};

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use domain::summary::{self as SummaryApi, SummarizeRequest, SummarizeResult};
use log::*;

/// POST summarize a meeting transcript
#[utoipa::path(
    post,
    path = "/api/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Successfully summarized the transcript", body = SummarizeResult),
        (status = 400, description = "Missing transcript or malformed body", body = ErrorBody),
        (status = 500, description = "Missing Gemini configuration or Gemini failure", body = ErrorBody),
    )
)]
pub async fn summarize(
    State(app_state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(request) = payload.map_err(json_rejection_error)?;
    debug!("POST summarize transcript");

    let result = SummaryApi::summarize(
        app_state.config_ref(),
        app_state.http_client_ref(),
        &request,
    )
    .await?;

    info!("Summary generated");
    Ok(Json(result))
}
