use thiserror::Error;

use super::{chain_client::FeeHistoryResponse, fee_estimator::FeeEstimatorError};

/// Fees paid in a single block of the history window, in wei.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FeeHistorySample {
    pub block_number: u64,
    pub low: u128,
    pub medium: u128,
    pub high: u128,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseQuantityError {
    #[error("empty quantity")]
    Empty,

    #[error("invalid quantity '{0}'")]
    Invalid(String),
}

/// Parses a JSON-RPC quantity: `0x`-prefixed hexadecimal or plain decimal.
pub fn parse_quantity(value: &str) -> Result<u128, ParseQuantityError> {
    let (digits, radix) = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (value, 10),
    };

    if digits.is_empty() {
        return Err(ParseQuantityError::Empty);
    }

    // from_str_radix tolerates a leading '+'
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ParseQuantityError::Invalid(value.to_string()));
    }

    u128::from_str_radix(digits, radix).map_err(|_| ParseQuantityError::Invalid(value.to_string()))
}

fn parse_field(name: &str, value: &str) -> Result<u128, FeeEstimatorError> {
    parse_quantity(value).map_err(|e| {
        FeeEstimatorError::MalformedResponse(format!("{} is not a quantity: {}", name, e))
    })
}

fn add_fee(base_fee: u128, priority_fee: u128) -> Result<u128, FeeEstimatorError> {
    base_fee
        .checked_add(priority_fee)
        .ok_or_else(|| FeeEstimatorError::MalformedResponse("fee per gas overflows".to_string()))
}

/// Pairs each block's base fee with its three priority fees.
///
/// Walks `reward` by index, so a trailing `baseFeePerGas` entry (the next
/// block's base fee, which nodes always append) is ignored.
pub fn derive_samples(
    fee_history: &FeeHistoryResponse,
) -> Result<Vec<FeeHistorySample>, FeeEstimatorError> {
    let oldest_block = parse_field("oldestBlock", &fee_history.oldest_block)?;
    let oldest_block = u64::try_from(oldest_block).map_err(|_| {
        FeeEstimatorError::MalformedResponse(format!(
            "oldestBlock {} does not fit a block number",
            fee_history.oldest_block
        ))
    })?;

    fee_history
        .reward
        .iter()
        .enumerate()
        .map(|(i, rewards)| {
            if rewards.len() != 3 {
                return Err(FeeEstimatorError::MalformedResponse(format!(
                    "reward[{}] has {} entries, expected 3",
                    i,
                    rewards.len()
                )));
            }

            let base_fee = fee_history.base_fee_per_gas.get(i).ok_or_else(|| {
                FeeEstimatorError::MalformedResponse(format!("baseFeePerGas[{}] is missing", i))
            })?;
            let base_fee = parse_field("baseFeePerGas", base_fee)?;

            let block_number = oldest_block.checked_add(i as u64).ok_or_else(|| {
                FeeEstimatorError::MalformedResponse("block number overflows".to_string())
            })?;

            Ok(FeeHistorySample {
                block_number,
                low: add_fee(base_fee, parse_field("reward", &rewards[0])?)?,
                medium: add_fee(base_fee, parse_field("reward", &rewards[1])?)?,
                high: add_fee(base_fee, parse_field("reward", &rewards[2])?)?,
            })
        })
        .collect()
}

/// Arithmetic mean rounded half-up, computed exactly on integers.
pub fn average(values: impl IntoIterator<Item = u128>) -> Result<u128, FeeEstimatorError> {
    let mut sum: u128 = 0;
    let mut count: u128 = 0;

    for value in values {
        sum = sum.checked_add(value).ok_or_else(|| {
            FeeEstimatorError::MalformedResponse("fee sum overflows".to_string())
        })?;
        count += 1;
    }

    if count == 0 {
        return Err(FeeEstimatorError::EmptySampleSet);
    }

    // floor(sum / count + 1/2) without leaving integers
    let quotient = sum / count;
    let remainder = sum % count;
    if remainder >= count - remainder {
        Ok(quotient + 1)
    } else {
        Ok(quotient)
    }
}
