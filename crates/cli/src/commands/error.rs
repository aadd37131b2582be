use thiserror::Error;

use gasfee_core::{RetryClientError, gas::FeeEstimatorError, render::RenderError};

/// Errors from a one-off estimate
#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("{0}")]
    Provider(#[from] RetryClientError),

    #[error("{0}")]
    Estimator(#[from] FeeEstimatorError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("Failed to serialize the estimate: {0}")]
    Json(#[from] serde_json::Error),
}
