//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places every published amount carries.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds a monetary amount to 2 decimal places, half away from zero.
///
/// The result always carries a scale of 2, so `750` is returned as `750.00`.
///
/// # Examples
///
/// ```
/// use paye_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("0.005").unwrap()).to_string(), "0.01");
/// assert_eq!(round_currency(Decimal::from_str("-0.005").unwrap()).to_string(), "-0.01");
/// assert_eq!(round_currency(Decimal::new(750, 0)).to_string(), "750.00");
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    );
    rounded.rescale(CURRENCY_DECIMAL_PLACES);
    rounded
}
