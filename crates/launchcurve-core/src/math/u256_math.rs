//! Big integer operations for high-precision math
//!
//! `mul_div` and friends widen into `ethnum::U256` so that the product of two
//! `u128` operands can never overflow before the division.

use ethnum::U256;

use crate::errors::{CoreResult, LaunchCurveError};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize, serde::Deserialize))]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// Narrow a U256 into u128
pub fn u256_to_u128(value: U256) -> CoreResult<u128> {
    let (hi, lo) = value.into_words();
    if hi != 0 {
        return Err(LaunchCurveError::TypeCastFailed);
    }
    Ok(lo)
}

/// Narrow a U256 into u64
pub fn u256_to_u64(value: U256) -> CoreResult<u64> {
    let lo = u256_to_u128(value)?;
    u64::try_from(lo).map_err(|_| LaunchCurveError::TypeCastFailed)
}

/// Narrow a u128 into u64
pub fn u128_to_u64(value: u128) -> CoreResult<u64> {
    u64::try_from(value).map_err(|_| LaunchCurveError::TypeCastFailed)
}

/// Divide with the requested rounding
pub fn div_rounding(numerator: U256, denominator: U256, rounding: Rounding) -> CoreResult<U256> {
    if denominator == U256::ZERO {
        return Err(LaunchCurveError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Ok(quotient),
        Rounding::Up => {
            if numerator % denominator == U256::ZERO {
                Ok(quotient)
            } else {
                quotient
                    .checked_add(U256::ONE)
                    .ok_or(LaunchCurveError::MathOverflow)
            }
        }
    }
}

/// (x * y) / denominator with a 256-bit intermediate
pub fn mul_div_u256(x: U256, y: U256, denominator: U256, rounding: Rounding) -> CoreResult<U256> {
    if denominator == U256::ZERO {
        return Err(LaunchCurveError::DivisionByZero);
    }
    let product = x.checked_mul(y).ok_or(LaunchCurveError::MathOverflow)?;
    div_rounding(product, denominator, rounding)
}

/// Multiply two u128 values and divide by a third with specified rounding
pub fn mul_div_u128(x: u128, y: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    let result = mul_div_u256(
        U256::from(x),
        U256::from(y),
        U256::from(denominator),
        rounding,
    )?;
    u256_to_u128(result)
}

/// Multiply two u64 values and divide by a third with specified rounding
pub fn mul_div_u64(x: u64, y: u64, denominator: u64, rounding: Rounding) -> CoreResult<u64> {
    if denominator == 0 {
        return Err(LaunchCurveError::DivisionByZero);
    }

    let product = (x as u128) * (y as u128);
    let quotient = product / (denominator as u128);
    let remainder = product % (denominator as u128);

    let mut result = quotient;
    if rounding == Rounding::Up && remainder > 0 {
        result = result.checked_add(1).ok_or(LaunchCurveError::MathOverflow)?;
    }

    u128_to_u64(result)
}

/// (x << offset) / y with specified rounding
pub fn shl_div(x: u128, y: u128, offset: u32, rounding: Rounding) -> CoreResult<u128> {
    let shifted = U256::from(x)
        .checked_shl(offset)
        .ok_or(LaunchCurveError::MathOverflow)?;
    if (shifted >> offset) != U256::from(x) {
        return Err(LaunchCurveError::MathOverflow);
    }
    u256_to_u128(div_rounding(shifted, U256::from(y), rounding)?)
}
