mod fee_estimate;
pub use fee_estimate::{FeeEstimate, FeeTier};

mod reward_percentiles;
pub use reward_percentiles::{RewardPercentiles, RewardPercentilesError};
