//! # Curve Math
//!
//! Constant-liquidity relations between sqrt price, liquidity and token
//! amounts inside one curve segment. Liquidity carries an extra 2^64 scale, so
//! base deltas divide by the product of two Q64 prices and quote deltas shift
//! right by 128.

use ethnum::U256;

use crate::constants::RESOLUTION;
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::safe_math::SafeMath;
use crate::math::u256_math::{div_rounding, mul_div_u256, u256_to_u128, u256_to_u64, Rounding};

/// Base token amount between two sqrt prices, unbounded width
///
/// Δbase = L * (upper - lower) / (lower * upper)
pub fn get_delta_amount_base_unsigned_256(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    rounding: Rounding,
) -> CoreResult<U256> {
    let numerator_1 = U256::from(liquidity);
    let numerator_2 = U256::from(upper_sqrt_price.safe_sub(lower_sqrt_price)?);
    let denominator = U256::from(lower_sqrt_price).safe_mul(U256::from(upper_sqrt_price))?;
    if denominator == U256::ZERO {
        return Err(LaunchCurveError::DivisionByZero);
    }
    mul_div_u256(numerator_1, numerator_2, denominator, rounding)
}

/// Base token amount between two sqrt prices
pub fn get_delta_amount_base_unsigned(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    rounding: Rounding,
) -> CoreResult<u64> {
    let result =
        get_delta_amount_base_unsigned_256(lower_sqrt_price, upper_sqrt_price, liquidity, rounding)?;
    u256_to_u64(result)
}

/// Quote token amount between two sqrt prices, unbounded width
///
/// Δquote = L * (upper - lower) / 2^128
pub fn get_delta_amount_quote_unsigned_256(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    rounding: Rounding,
) -> CoreResult<U256> {
    let delta_sqrt_price = U256::from(upper_sqrt_price.safe_sub(lower_sqrt_price)?);
    let product = U256::from(liquidity).safe_mul(delta_sqrt_price)?;

    match rounding {
        Rounding::Up => {
            let denominator = U256::ONE << RESOLUTION;
            div_rounding(product, denominator, Rounding::Up)
        }
        Rounding::Down => Ok(product >> RESOLUTION),
    }
}

/// Quote token amount between two sqrt prices
pub fn get_delta_amount_quote_unsigned(
    lower_sqrt_price: u128,
    upper_sqrt_price: u128,
    liquidity: u128,
    rounding: Rounding,
) -> CoreResult<u64> {
    let result =
        get_delta_amount_quote_unsigned_256(lower_sqrt_price, upper_sqrt_price, liquidity, rounding)?;
    u256_to_u64(result)
}

/// Next sqrt price after adding `amount` of input to the pool
///
/// Selling base pushes price down; buying with quote pushes price up. Both
/// directions round so that the trader receives less, never more.
pub fn get_next_sqrt_price_from_input(
    sqrt_price: u128,
    liquidity: u128,
    amount_in: u64,
    base_for_quote: bool,
) -> CoreResult<u128> {
    if sqrt_price == 0 || liquidity == 0 {
        return Err(LaunchCurveError::InconsistentPoolState(
            "zero sqrt price or liquidity",
        ));
    }

    if base_for_quote {
        get_next_sqrt_price_from_amount_base_rounding_up(sqrt_price, liquidity, amount_in)
    } else {
        get_next_sqrt_price_from_amount_quote_rounding_down(sqrt_price, liquidity, amount_in)
    }
}

/// √P' = √P * L / (L + Δbase * √P), rounded up
pub fn get_next_sqrt_price_from_amount_base_rounding_up(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> CoreResult<u128> {
    if amount == 0 {
        return Ok(sqrt_price);
    }

    let sqrt_price = U256::from(sqrt_price);
    let liquidity = U256::from(liquidity);

    let product = U256::from(amount).safe_mul(sqrt_price)?;
    let denominator = liquidity.safe_add(product)?;
    let result = mul_div_u256(liquidity, sqrt_price, denominator, Rounding::Up)?;
    u256_to_u128(result)
}

/// √P' = √P + Δquote * 2^128 / L, rounded down
pub fn get_next_sqrt_price_from_amount_quote_rounding_down(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
) -> CoreResult<u128> {
    let quotient = (U256::from(amount) << RESOLUTION).safe_div(U256::from(liquidity))?;
    let result = U256::from(sqrt_price).safe_add(quotient)?;
    u256_to_u128(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ONE_Q64;

    const LIQUIDITY: u128 = 1_000_000_000u128 << 64;

    #[test]
    fn test_delta_amounts_unit_price() {
        // Price 1.0 -> 4.0 (sqrt 1.0 -> 2.0) with L_real = 1e9
        let lower = ONE_Q64;
        let upper = 2 * ONE_Q64;

        // quote = L_real * (2 - 1) = 1e9
        let quote = get_delta_amount_quote_unsigned(lower, upper, LIQUIDITY, Rounding::Down).unwrap();
        assert_eq!(quote, 1_000_000_000);

        // base = L_real * (1/1 - 1/2) = 5e8
        let base = get_delta_amount_base_unsigned(lower, upper, LIQUIDITY, Rounding::Down).unwrap();
        assert_eq!(base, 500_000_000);
    }

    #[test]
    fn test_rounding_direction() {
        let lower = ONE_Q64 + 12_345;
        let upper = ONE_Q64 * 3 / 2 + 7;
        let liquidity = 987_654_321_123u128 << 20;

        let base_down = get_delta_amount_base_unsigned(lower, upper, liquidity, Rounding::Down).unwrap();
        let base_up = get_delta_amount_base_unsigned(lower, upper, liquidity, Rounding::Up).unwrap();
        assert!(base_up >= base_down && base_up - base_down <= 1);

        let quote_down = get_delta_amount_quote_unsigned(lower, upper, liquidity, Rounding::Down).unwrap();
        let quote_up = get_delta_amount_quote_unsigned(lower, upper, liquidity, Rounding::Up).unwrap();
        assert!(quote_up >= quote_down && quote_up - quote_down <= 1);
    }

    #[test]
    fn test_inverted_range_underflows() {
        assert_eq!(
            get_delta_amount_quote_unsigned(2, 1, LIQUIDITY, Rounding::Down),
            Err(LaunchCurveError::MathUnderflow)
        );
    }

    #[test]
    fn test_next_sqrt_price() {
        let sqrt_price = 2 * ONE_Q64;

        // Adding base moves price down, adding quote moves price up
        let down = get_next_sqrt_price_from_input(sqrt_price, LIQUIDITY, 1_000, true).unwrap();
        assert!(down < sqrt_price);
        let up = get_next_sqrt_price_from_input(sqrt_price, LIQUIDITY, 1_000, false).unwrap();
        assert!(up > sqrt_price);

        // Zero input leaves the price untouched
        assert_eq!(get_next_sqrt_price_from_input(sqrt_price, LIQUIDITY, 0, true).unwrap(), sqrt_price);
        assert_eq!(get_next_sqrt_price_from_input(sqrt_price, LIQUIDITY, 0, false).unwrap(), sqrt_price);

        // Buying the full 1e9 quote between sqrt 1 and 2 lands exactly on 2
        let next = get_next_sqrt_price_from_input(ONE_Q64, LIQUIDITY, 1_000_000_000, false).unwrap();
        assert_eq!(next, 2 * ONE_Q64);
    }

    #[test]
    fn test_next_sqrt_price_rejects_empty_segment() {
        assert!(matches!(
            get_next_sqrt_price_from_input(ONE_Q64, 0, 1, true),
            Err(LaunchCurveError::InconsistentPoolState(_))
        ));
    }
}
