use std::sync::Arc;

use clap::Args;
use gasfee_core::{
    EvmChainClient, GasFeeConfig,
    gas::{FeeEstimate, FeeEstimator, RewardPercentiles, api::GasFeeResponse},
    gasfee_error, gasfee_info,
    render::{GasFeeDisplay, PriorityLabels},
};

use crate::{commands::error::EstimateError, console::print_table};

#[derive(Args)]
pub struct EstimateArgs {
    /// optional - The directory holding the `.env` to load, default is where the command is run.
    #[clap(long, short)]
    pub path: Option<String>,

    /// Number of recent blocks to average, overrides GAS_FEE_BLOCK_COUNT
    #[clap(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub block_count: Option<u64>,

    /// Low, medium and high reward percentiles, e.g. "25,50,75"
    #[clap(long)]
    pub percentiles: Option<RewardPercentiles>,

    /// How captions pair with tiers: "matching" or "inverted"
    #[clap(long)]
    pub labels: Option<PriorityLabels>,

    /// Print the estimate as JSON instead of a table
    #[clap(long)]
    pub json: bool,
}

impl EstimateArgs {
    fn apply(&self, config: &mut GasFeeConfig) {
        if let Some(block_count) = self.block_count {
            config.block_count = block_count;
        }
        if let Some(percentiles) = self.percentiles {
            config.reward_percentiles = percentiles;
        }
        if let Some(labels) = self.labels {
            config.labels = labels;
        }
    }
}

fn table_rows(estimate: &FeeEstimate, display: &GasFeeDisplay) -> Vec<Vec<String>> {
    display
        .rows
        .iter()
        .map(|row| {
            vec![row.label.to_string(), row.gwei.clone(), estimate.tier(row.tier).to_string()]
        })
        .collect()
}

pub async fn handle_estimate(
    args: &EstimateArgs,
    mut config: GasFeeConfig,
) -> Result<(), EstimateError> {
    args.apply(&mut config);

    let chain_client = EvmChainClient::connect(&config.rpc_url, config.rpc_timeout)?;
    let fee_estimator = FeeEstimator::new(Arc::new(chain_client));

    gasfee_info!(
        "Estimating {} fees over {} blocks at percentiles {}",
        config.network_name,
        config.block_count,
        config.reward_percentiles
    );

    let estimate = fee_estimator
        .estimate(config.block_count, &config.reward_percentiles)
        .await
        .inspect_err(|e| gasfee_error!("Fee estimation failed ({}) - {}", e.kind(), e))?;
    let display = GasFeeDisplay::new(&estimate, config.labels)?;

    if args.json {
        let response = GasFeeResponse { estimate, display };
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_table(
            vec!["Priority", "Gwei", "Wei"],
            table_rows(&estimate, &display),
            Some(&format!("Average gas fees on {}", config.network_name)),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GasFeeConfig {
        GasFeeConfig::from_lookup(|name| (name == "RPC_URL").then(|| "http://node".into())).unwrap()
    }

    #[test]
    fn test_flags_override_env_config() {
        let mut config = config();
        let args = EstimateArgs {
            path: None,
            block_count: Some(4),
            percentiles: Some(RewardPercentiles::new([5.0, 50.0, 95.0]).unwrap()),
            labels: Some(PriorityLabels::Inverted),
            json: false,
        };

        args.apply(&mut config);

        assert_eq!(config.block_count, 4);
        assert_eq!(config.reward_percentiles.as_slice(), &[5.0, 50.0, 95.0]);
        assert_eq!(config.labels, PriorityLabels::Inverted);
    }

    #[test]
    fn test_table_rows_follow_display_order() {
        let estimate =
            FeeEstimate { low: 1_000_000_000, medium: 1_500_000_000, high: 2_000_000_000 };
        let display = GasFeeDisplay::new(&estimate, PriorityLabels::Matching).unwrap();

        assert_eq!(
            table_rows(&estimate, &display),
            vec![
                vec!["High Priority".to_string(), "2.00".to_string(), "2000000000".to_string()],
                vec!["Medium Priority".to_string(), "1.50".to_string(), "1500000000".to_string()],
                vec!["Low Priority".to_string(), "1.00".to_string(), "1000000000".to_string()],
            ]
        );
    }
}
