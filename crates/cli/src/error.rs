use thiserror::Error;

use crate::commands::error::EstimateError;

/// Top-level CLI error
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] gasfee_core::ConfigError),

    #[error("Estimate error: {0}")]
    Estimate(#[from] EstimateError),

    #[error("Server error: {0}")]
    Start(#[from] gasfee_core::StartError),

    #[error("{0}")]
    Path(String),
}

impl From<String> for CliError {
    fn from(err: String) -> Self {
        CliError::Path(err)
    }
}
