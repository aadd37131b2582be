use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::gwei::{format_gwei, RenderError};
use crate::gas::{FeeEstimate, FeeTier};

/// How the three captions are paired with the estimate's tiers.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLabels {
    /// "High Priority" shows `high`, "Low Priority" shows `low`.
    #[default]
    Matching,
    /// "High Priority" shows `low`, "Low Priority" shows `high`.
    Inverted,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported priority labels '{0}', expected 'matching' or 'inverted'")]
pub struct PriorityLabelsError(String);

impl FromStr for PriorityLabels {
    type Err = PriorityLabelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "matching" => Ok(PriorityLabels::Matching),
            "inverted" => Ok(PriorityLabels::Inverted),
            _ => Err(PriorityLabelsError(s.to_string())),
        }
    }
}

impl PriorityLabels {
    /// Captions in display order, each with the tier it shows.
    pub fn rows(&self) -> [(&'static str, FeeTier); 3] {
        match self {
            PriorityLabels::Matching => [
                ("High Priority", FeeTier::High),
                ("Medium Priority", FeeTier::Medium),
                ("Low Priority", FeeTier::Low),
            ],
            PriorityLabels::Inverted => [
                ("High Priority", FeeTier::Low),
                ("Medium Priority", FeeTier::Medium),
                ("Low Priority", FeeTier::High),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityRow {
    pub label: &'static str,
    pub tier: FeeTier,
    pub gwei: String,
}

/// A [`FeeEstimate`] converted to gwei strings and captioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasFeeDisplay {
    pub rows: Vec<PriorityRow>,
}

impl GasFeeDisplay {
    pub fn new(estimate: &FeeEstimate, labels: PriorityLabels) -> Result<Self, RenderError> {
        let rows = labels
            .rows()
            .into_iter()
            .map(|(label, tier)| {
                Ok(PriorityRow { label, tier, gwei: format_gwei(estimate.tier(tier))? })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        Ok(GasFeeDisplay { rows })
    }

    pub fn row(&self, label: &str) -> Option<&PriorityRow> {
        self.rows.iter().find(|row| row.label == label)
    }
}
