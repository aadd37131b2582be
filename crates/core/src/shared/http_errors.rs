use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{
    gas::{ChainClientError, FeeEstimatorError},
    render::RenderError,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

pub type HttpError = (StatusCode, Json<ErrorResponse>);

fn http_error(status: StatusCode, kind: &str, message: String) -> HttpError {
    (status, Json(ErrorResponse { error: message, kind: kind.to_string() }))
}

pub fn internal_server_error(message: Option<String>) -> HttpError {
    http_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal",
        message.unwrap_or("Internal server error".to_string()),
    )
}

/// Every estimation failure originates upstream at the node.
pub fn estimator_status(error: &FeeEstimatorError) -> StatusCode {
    match error {
        FeeEstimatorError::RemoteCall(ChainClientError::Timeout { .. }) => {
            StatusCode::GATEWAY_TIMEOUT
        }
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl From<FeeEstimatorError> for HttpError {
    fn from(error: FeeEstimatorError) -> HttpError {
        error!("Fee estimation failed - {:?}", error);
        http_error(estimator_status(&error), error.kind(), error.to_string())
    }
}

impl From<RenderError> for HttpError {
    fn from(error: RenderError) -> HttpError {
        error!("Fee estimate could not be rendered - {:?}", error);
        internal_server_error(Some(error.to_string()))
    }
}
