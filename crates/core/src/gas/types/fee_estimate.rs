use serde::{Deserialize, Serialize};

/// Average fee per gas for each priority tier, in wei.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeeEstimate {
    pub low: u128,
    pub medium: u128,
    pub high: u128,
}

/// One of the three tiers of a [`FeeEstimate`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeTier {
    Low,
    Medium,
    High,
}

impl FeeEstimate {
    pub fn tier(&self, tier: FeeTier) -> u128 {
        match tier {
            FeeTier::Low => self.low,
            FeeTier::Medium => self.medium,
            FeeTier::High => self.high,
        }
    }
}

impl FeeTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeeTier::Low => "low",
            FeeTier::Medium => "medium",
            FeeTier::High => "high",
        }
    }
}
