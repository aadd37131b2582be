mod app_state;
pub use app_state::AppState;
mod config;
pub use config::{load_env_from_project_path, ApiConfig, ConfigError, GasFeeConfig};
pub mod gas;
mod logger;
pub use logger::{setup_info_logger, setup_logger};
mod provider;
pub use provider::{create_retry_client, EvmChainClient, GasFeeProvider, RetryClientError};
pub mod render;
mod shared;
pub use shared::{ErrorResponse, HttpError};
mod startup;
pub use startup::{create_app, start, StartError};

pub use tracing::{error as gasfee_error, info as gasfee_info};
