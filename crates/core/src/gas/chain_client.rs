use std::time::Duration;

use alloy::{
    eips::BlockNumberOrTag,
    transports::{RpcError, TransportErrorKind},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw `eth_feeHistory` result with every quantity left in its encoded form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeHistoryResponse {
    pub base_fee_per_gas: Vec<String>,

    /// One entry per block, each holding one priority fee per requested percentile.
    #[serde(default)]
    pub reward: Vec<Vec<String>>,

    pub oldest_block: String,
}

/// The only part of a block the estimator reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockFees {
    #[serde(default)]
    pub base_fee_per_gas: Option<String>,
}

#[derive(Error, Debug)]
pub enum ChainClientError {
    #[error("Provider error: {0}")]
    Rpc(#[from] RpcError<TransportErrorKind>),

    #[error("{method} timed out after {timeout:?}")]
    Timeout { method: &'static str, timeout: Duration },
}

/// Read access to an Ethereum-compatible node.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_fee_history(
        &self,
        block_count: u64,
        newest_block: BlockNumberOrTag,
        percentiles: &[f64],
    ) -> Result<FeeHistoryResponse, ChainClientError>;

    /// Returns `None` when the node does not know the block.
    async fn get_block(&self, tag: BlockNumberOrTag)
        -> Result<Option<BlockFees>, ChainClientError>;
}
