use std::{sync::Arc, time::Instant};

use alloy::eips::BlockNumberOrTag;
use thiserror::Error;
use tracing::{debug, info};

use crate::gas::{
    chain_client::{ChainClient, ChainClientError},
    fee_history::{average, derive_samples, parse_quantity},
    types::{FeeEstimate, RewardPercentiles},
};

#[derive(Error, Debug)]
pub enum FeeEstimatorError {
    #[error("Remote call failed: {0}")]
    RemoteCall(#[from] ChainClientError),

    #[error("Malformed response from provider: {0}")]
    MalformedResponse(String),

    #[error("No fee history samples to average")]
    EmptySampleSet,
}

impl FeeEstimatorError {
    /// Stable identifier for the failure kind, used by the HTTP and CLI surfaces.
    pub fn kind(&self) -> &'static str {
        match self {
            FeeEstimatorError::RemoteCall(_) => "remote_call",
            FeeEstimatorError::MalformedResponse(_) => "malformed_response",
            FeeEstimatorError::EmptySampleSet => "empty_sample_set",
        }
    }
}

/// Averages the low/medium/high fee tiers of recent blocks and adds the
/// pending block's base fee.
#[derive(Clone)]
pub struct FeeEstimator {
    chain_client: Arc<dyn ChainClient>,
}

impl FeeEstimator {
    pub fn new(chain_client: Arc<dyn ChainClient>) -> Self {
        FeeEstimator { chain_client }
    }

    /// Estimates fees over the last `block_count` blocks.
    ///
    /// The fee history and the pending block are fetched concurrently; the
    /// result only depends on those two responses.
    ///
    /// # Arguments
    /// * `block_count` - How many of the most recent blocks to average over
    /// * `percentiles` - The low, medium and high priority fee percentiles
    ///
    /// # Returns
    /// * `Ok(FeeEstimate)` - Fee per gas for each tier in wei
    /// * `Err(FeeEstimatorError)` - Remote, malformed-response or empty-window failure
    pub async fn estimate(
        &self,
        block_count: u64,
        percentiles: &RewardPercentiles,
    ) -> Result<FeeEstimate, FeeEstimatorError> {
        if block_count == 0 {
            return Err(FeeEstimatorError::EmptySampleSet);
        }

        let started = Instant::now();

        let (fee_history, pending_block) = tokio::try_join!(
            self.chain_client.get_fee_history(
                block_count,
                BlockNumberOrTag::Latest,
                percentiles.as_slice()
            ),
            self.chain_client.get_block(BlockNumberOrTag::Pending),
        )?;

        let samples = derive_samples(&fee_history)?;
        debug!(
            "Derived {} fee history samples starting at block {}",
            samples.len(),
            samples.first().map(|s| s.block_number).unwrap_or_default()
        );

        let pending_base_fee = pending_block
            .ok_or_else(|| {
                FeeEstimatorError::MalformedResponse("pending block not returned".to_string())
            })?
            .base_fee_per_gas
            .ok_or_else(|| {
                FeeEstimatorError::MalformedResponse(
                    "pending block has no baseFeePerGas, EIP-1559 not supported".to_string(),
                )
            })?;
        let pending_base_fee = parse_quantity(&pending_base_fee).map_err(|e| {
            FeeEstimatorError::MalformedResponse(format!("pending baseFeePerGas: {}", e))
        })?;

        let low = average(samples.iter().map(|s| s.low))?;
        let medium = average(samples.iter().map(|s| s.medium))?;
        let high = average(samples.iter().map(|s| s.high))?;

        let with_pending = |value: u128| {
            value.checked_add(pending_base_fee).ok_or_else(|| {
                FeeEstimatorError::MalformedResponse("fee per gas overflows".to_string())
            })
        };

        let estimate = FeeEstimate {
            low: with_pending(low)?,
            medium: with_pending(medium)?,
            high: with_pending(high)?,
        };

        info!(
            "Estimated fees over {} blocks in {:?} - low: {}, medium: {}, high: {}",
            samples.len(),
            started.elapsed(),
            estimate.low,
            estimate.medium,
            estimate.high
        );

        Ok(estimate)
    }
}
