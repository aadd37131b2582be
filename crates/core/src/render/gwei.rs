use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Display scale: one gwei is 10^9 wei.
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

const GWEI_DECIMALS: u32 = 9;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("{0} wei is too large to display in gwei")]
    ValueTooLarge(u128),

    #[error("Page template failed: {0}")]
    Template(String),
}

/// Formats a wei amount as gwei with exactly two fractional digits.
///
/// The conversion is exact (wei is read as a scale-9 decimal) and the
/// rounding is midpoint-away-from-zero, so `1_005_000_000` wei is `"1.01"`.
pub fn format_gwei(wei: u128) -> Result<String, RenderError> {
    let mantissa = i128::try_from(wei).map_err(|_| RenderError::ValueTooLarge(wei))?;
    let gwei = Decimal::try_from_i128_with_scale(mantissa, GWEI_DECIMALS)
        .map_err(|_| RenderError::ValueTooLarge(wei))?;

    let rounded = gwei.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Ok(format!("{:.2}", rounded))
}
