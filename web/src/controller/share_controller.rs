use crate::controller::json_rejection_error;
use crate::error::ErrorBody;
use crate::{AppState, Error};

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use domain::share::{self as ShareApi, ShareRequest};
use log::*;
use serde::Serialize;
use utoipa::ToSchema;

pub const SHARE_SUCCESS_MESSAGE: &str = "Summary sent successfully!";

#[derive(Debug, Serialize, ToSchema)]
pub struct ShareResponse {
    pub message: String,
}

/// POST email a summary to a list of recipients
#[utoipa::path(
    post,
    path = "/api/share",
    request_body = ShareRequest,
    responses(
        (status = 200, description = "Successfully sent the summary", body = ShareResponse),
        (status = 400, description = "Missing summary, recipients or malformed body", body = ErrorBody),
        (status = 500, description = "Missing mail configuration or delivery failure", body = ErrorBody),
    )
)]
pub async fn share(
    State(app_state): State<AppState>,
    payload: Result<Json<ShareRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(request) = payload.map_err(json_rejection_error)?;
    debug!("POST share summary");

    let result = ShareApi::share_summary(app_state.config_ref(), &request).await?;

    info!("Summary shared, message_id: {:?}", result.message_id);
    Ok(Json(ShareResponse {
        message: SHARE_SUCCESS_MESSAGE.to_string(),
    }))
}
