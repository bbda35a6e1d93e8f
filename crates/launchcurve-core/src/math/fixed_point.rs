//! # Q64 Fixed-Point Functions
//!
//! Q64.64 power and integer square root. The power function follows the
//! on-chain program's bit-by-bit square-and-multiply so that every truncation
//! happens at the same step.

use ethnum::U256;

use crate::constants::{MAX_EXPONENTIAL, ONE_Q64, SCALE_OFFSET};
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::safe_math::SafeMath;
use crate::math::u256_math::u256_to_u128;

/// Q64 multiply: (a * b) >> 64 through a 256-bit intermediate
fn mul_q64(a: u128, b: u128) -> CoreResult<u128> {
    let product = U256::from(a).safe_mul(U256::from(b))?;
    u256_to_u128(product >> SCALE_OFFSET)
}

/// Raise a Q64 `base` to an integer power
///
/// Processes the exponent least-significant bit first: the running square of
/// the base is multiplied into the result for every set bit. A result that
/// truncates to zero is reported as underflow.
pub fn pow(base: u128, exp: u128) -> CoreResult<u128> {
    if exp == 0 {
        return Ok(ONE_Q64);
    }
    if exp >= MAX_EXPONENTIAL {
        return Err(LaunchCurveError::MathOverflow);
    }

    let mut squared_base = base;
    let mut result = ONE_Q64;
    let mut remaining = exp;

    while remaining > 0 {
        if remaining & 0x1 > 0 {
            result = mul_q64(result, squared_base)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            squared_base = mul_q64(squared_base, squared_base)?;
        }
    }

    if result == 0 {
        return Err(LaunchCurveError::MathUnderflow);
    }
    Ok(result)
}

/// Integer square root of a U256 (floor), Newton's method
pub fn sqrt_u256(value: U256) -> U256 {
    if value < U256::new(2) {
        return value;
    }

    // Initial guess from the bit length keeps the iteration count small
    let bits = 256 - value.leading_zeros();
    let mut x = U256::ONE << ((bits + 1) / 2);
    loop {
        let y = (x + value / x) >> 1u32;
        if y >= x {
            return x;
        }
        x = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow_identities() {
        let half = ONE_Q64 / 2;
        assert_eq!(pow(half, 0).unwrap(), ONE_Q64);
        assert_eq!(pow(half, 1).unwrap(), half);
        assert_eq!(pow(half, 2).unwrap(), ONE_Q64 / 4);
        assert_eq!(pow(half, 10).unwrap(), ONE_Q64 >> 10);
        assert_eq!(pow(ONE_Q64, 1_000).unwrap(), ONE_Q64);
    }

    #[test]
    fn test_pow_matches_repeated_multiplication_for_small_exponents() {
        // 0.9 in Q64; for exp = 3 the bitwise path is base * base^2
        let base = ONE_Q64 - ONE_Q64 / 10;
        let squared = mul_q64(base, base).unwrap();
        let expected = mul_q64(base, squared).unwrap();
        assert_eq!(pow(base, 3).unwrap(), expected);
    }

    #[test]
    fn test_pow_limits() {
        assert_eq!(pow(ONE_Q64 / 2, MAX_EXPONENTIAL), Err(LaunchCurveError::MathOverflow));
        // 0.5^200 truncates to zero in Q64
        assert_eq!(pow(ONE_Q64 / 2, 200), Err(LaunchCurveError::MathUnderflow));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(sqrt_u256(U256::ZERO), U256::ZERO);
        assert_eq!(sqrt_u256(U256::ONE), U256::ONE);
        assert_eq!(sqrt_u256(U256::new(15)), U256::new(3));
        assert_eq!(sqrt_u256(U256::new(16)), U256::new(4));
        assert_eq!(sqrt_u256(U256::MAX), U256::from(u128::MAX));
    }
}
