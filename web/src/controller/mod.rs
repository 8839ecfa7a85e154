use crate::Error;
use axum::extract::rejection::JsonRejection;
use domain::error::Error as DomainError;
use log::*;

pub(crate) mod health_check_controller;
pub(crate) mod share_controller;
pub(crate) mod summary_controller;

/// Turns an unreadable JSON body into a validation error so it is rendered like
/// every other failure.
pub(crate) fn json_rejection_error(rejection: JsonRejection) -> Error {
    warn!("Rejected request body: {}", rejection.body_text());
    Error::from(DomainError::validation(format!(
        "Invalid JSON body: {}",
        rejection.body_text()
    )))
}
