use std::{env, path::Path, str::FromStr, time::Duration};

use dotenvy::{dotenv, from_path};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{gas::RewardPercentiles, render::PriorityLabels};

pub const RPC_URL_ENV: &str = "RPC_URL";
pub const LEGACY_RPC_URL_ENV: &str = "ALCHEMY_URL";
pub const BLOCK_COUNT_ENV: &str = "GAS_FEE_BLOCK_COUNT";
pub const PERCENTILES_ENV: &str = "GAS_FEE_PERCENTILES";
pub const RPC_TIMEOUT_ENV: &str = "GAS_FEE_RPC_TIMEOUT_SECS";
pub const LABELS_ENV: &str = "GAS_FEE_LABELS";
pub const NETWORK_NAME_ENV: &str = "GAS_FEE_NETWORK_NAME";
pub const API_HOST_ENV: &str = "API_HOST";
pub const API_PORT_ENV: &str = "API_PORT";

/// Loads a project's `.env`, or the working directory's when the project has none.
///
/// Variables already set in the process win over the file.
pub fn load_env_from_project_path(project_path: &Path) {
    if from_path(project_path.join(".env")).is_err() {
        dotenv().ok();
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig { host: "localhost".to_string(), port: 3000 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GasFeeConfig {
    pub rpc_url: String,
    pub block_count: u64,
    pub reward_percentiles: RewardPercentiles,
    /// Upper bound on each RPC call
    pub rpc_timeout: Duration,
    pub labels: PriorityLabels,
    pub network_name: String,
    pub api_config: ApiConfig,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Environment variable RPC_URL (or ALCHEMY_URL) must be set")]
    RpcUrlMissing,

    #[error("Environment variable {name} has an invalid value '{value}': {reason}")]
    InvalidValue { name: &'static str, value: String, reason: String },
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(value) => value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
            name,
            value: value.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

impl GasFeeConfig {
    /// Reads the configuration from the process environment.
    ///
    /// Call [`load_env_from_project_path`] first so `.env` values are visible.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| lookup(name).filter(|url| !url.trim().is_empty());
        let rpc_url = non_blank(RPC_URL_ENV)
            .or_else(|| non_blank(LEGACY_RPC_URL_ENV))
            .ok_or(ConfigError::RpcUrlMissing)?;

        let block_count: u64 = parse_var(&lookup, BLOCK_COUNT_ENV, 10)?;
        if block_count == 0 {
            return Err(ConfigError::InvalidValue {
                name: BLOCK_COUNT_ENV,
                value: "0".to_string(),
                reason: "at least one block is required".to_string(),
            });
        }

        let rpc_timeout_secs: u64 = parse_var(&lookup, RPC_TIMEOUT_ENV, 10)?;
        if rpc_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: RPC_TIMEOUT_ENV,
                value: "0".to_string(),
                reason: "the timeout must be at least one second".to_string(),
            });
        }
        let defaults = ApiConfig::default();

        Ok(GasFeeConfig {
            rpc_url: rpc_url.trim().to_string(),
            block_count,
            reward_percentiles: parse_var(&lookup, PERCENTILES_ENV, RewardPercentiles::default())?,
            rpc_timeout: Duration::from_secs(rpc_timeout_secs),
            labels: parse_var(&lookup, LABELS_ENV, PriorityLabels::default())?,
            network_name: lookup(NETWORK_NAME_ENV).unwrap_or_else(|| "ETH Mainnet".to_string()),
            api_config: ApiConfig {
                host: lookup(API_HOST_ENV).unwrap_or(defaults.host),
                port: parse_var(&lookup, API_PORT_ENV, defaults.port)?,
            },
        })
    }
}
