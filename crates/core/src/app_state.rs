use crate::{
    gas::{FeeEstimator, RewardPercentiles},
    render::PriorityLabels,
    GasFeeConfig,
};

pub struct AppState {
    /// Estimator bound to the configured node
    pub fee_estimator: FeeEstimator,
    /// How many recent blocks each estimate averages over
    pub block_count: u64,
    pub reward_percentiles: RewardPercentiles,
    /// Caption-to-tier pairing for the page
    pub labels: PriorityLabels,
    pub network_name: String,
}

impl AppState {
    pub fn new(fee_estimator: FeeEstimator, config: &GasFeeConfig) -> Self {
        AppState {
            fee_estimator,
            block_count: config.block_count,
            reward_percentiles: config.reward_percentiles,
            labels: config.labels,
            network_name: config.network_name.clone(),
        }
    }
}
