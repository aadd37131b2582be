use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three percentile tiers requested from `eth_feeHistory`, lowest first.
///
/// Each value lies in `[0, 100]` and the sequence is strictly increasing, so
/// `reward[i][0..3]` always lines up with the low, medium and high tiers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct RewardPercentiles([f64; 3]);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewardPercentilesError {
    #[error("exactly 3 reward percentiles are required, got {0}")]
    WrongCount(usize),

    #[error("reward percentile {0} is outside 0..=100")]
    OutOfRange(f64),

    #[error("reward percentiles must be strictly increasing: {0:?}")]
    NotIncreasing([f64; 3]),

    #[error("invalid reward percentile '{0}'")]
    Invalid(String),
}

impl RewardPercentiles {
    pub fn new(values: [f64; 3]) -> Result<Self, RewardPercentilesError> {
        for value in values {
            if !(0.0..=100.0).contains(&value) {
                return Err(RewardPercentilesError::OutOfRange(value));
            }
        }

        if !(values[0] < values[1] && values[1] < values[2]) {
            return Err(RewardPercentilesError::NotIncreasing(values));
        }

        Ok(RewardPercentiles(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for RewardPercentiles {
    fn default() -> Self {
        RewardPercentiles([25.0, 50.0, 75.0])
    }
}

impl TryFrom<Vec<f64>> for RewardPercentiles {
    type Error = RewardPercentilesError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        let values: [f64; 3] = values
            .try_into()
            .map_err(|values: Vec<f64>| RewardPercentilesError::WrongCount(values.len()))?;
        RewardPercentiles::new(values)
    }
}

impl From<RewardPercentiles> for Vec<f64> {
    fn from(percentiles: RewardPercentiles) -> Self {
        percentiles.0.to_vec()
    }
}

/// Parses a comma separated list such as `25,50,75`.
impl FromStr for RewardPercentiles {
    type Err = RewardPercentilesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f64>().map_err(|_| RewardPercentilesError::Invalid(part.to_string()))
            })
            .collect::<Result<Vec<f64>, _>>()?;

        RewardPercentiles::try_from(values)
    }
}

impl fmt::Display for RewardPercentiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0[0], self.0[1], self.0[2])
    }
}
