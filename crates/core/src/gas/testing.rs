use std::{sync::Mutex, time::Duration};

use alloy::eips::BlockNumberOrTag;
use async_trait::async_trait;

use super::chain_client::{BlockFees, ChainClient, ChainClientError, FeeHistoryResponse};

/// Replays canned node responses and records what was asked for.
pub struct StaticChainClient {
    pub fee_history: FeeHistoryResponse,
    pub pending_block: Option<BlockFees>,
    pub fail_with_timeout: bool,
    calls: Mutex<Vec<String>>,
}

impl StaticChainClient {
    pub fn new(base_fees: &[&str], rewards: &[&[&str]], oldest_block: &str, pending: &str) -> Self {
        StaticChainClient {
            fee_history: FeeHistoryResponse {
                base_fee_per_gas: base_fees.iter().map(|s| s.to_string()).collect(),
                reward: rewards
                    .iter()
                    .map(|block| block.iter().map(|s| s.to_string()).collect())
                    .collect(),
                oldest_block: oldest_block.to_string(),
            },
            pending_block: Some(BlockFees { base_fee_per_gas: Some(pending.to_string()) }),
            fail_with_timeout: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainClient for StaticChainClient {
    async fn get_fee_history(
        &self,
        block_count: u64,
        newest_block: BlockNumberOrTag,
        percentiles: &[f64],
    ) -> Result<FeeHistoryResponse, ChainClientError> {
        self.calls.lock().unwrap().push(format!(
            "eth_feeHistory({}, {}, {:?})",
            block_count, newest_block, percentiles
        ));
        if self.fail_with_timeout {
            return Err(ChainClientError::Timeout {
                method: "eth_feeHistory",
                timeout: Duration::from_secs(1),
            });
        }
        Ok(self.fee_history.clone())
    }

    async fn get_block(
        &self,
        tag: BlockNumberOrTag,
    ) -> Result<Option<BlockFees>, ChainClientError> {
        self.calls.lock().unwrap().push(format!("eth_getBlockByNumber({})", tag));
        Ok(self.pending_block.clone())
    }
}
