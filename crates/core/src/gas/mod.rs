pub mod api;

mod chain_client;
pub use chain_client::{BlockFees, ChainClient, ChainClientError, FeeHistoryResponse};

mod fee_estimator;
pub use fee_estimator::*;

mod fee_history;
pub use fee_history::{
    average, derive_samples, parse_quantity, FeeHistorySample, ParseQuantityError,
};

mod types;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing;
