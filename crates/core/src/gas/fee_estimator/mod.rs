mod base;
pub use base::{FeeEstimator, FeeEstimatorError};
