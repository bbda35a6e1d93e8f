//! # Safe Math Operations
//!
//! Overflow-checked arithmetic matching the on-chain program: every operation
//! fails instead of wrapping.

use ethnum::U256;

use crate::constants::BASIS_POINT_MAX;
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::u256_math::{mul_div_u64, Rounding};

/// Checked arithmetic returning engine errors
pub trait SafeMath: Sized {
    fn safe_add(self, rhs: Self) -> CoreResult<Self>;
    fn safe_sub(self, rhs: Self) -> CoreResult<Self>;
    fn safe_mul(self, rhs: Self) -> CoreResult<Self>;
    fn safe_div(self, rhs: Self) -> CoreResult<Self>;
    fn safe_shl(self, shift: u32) -> CoreResult<Self>;
    fn safe_shr(self, shift: u32) -> CoreResult<Self>;
}

/// Macro to implement [`SafeMath`] over the checked_* methods of a type
macro_rules! safe_arith {
    ($type:ty, $zero:expr) => {
        impl SafeMath for $type {
            fn safe_add(self, rhs: Self) -> CoreResult<Self> {
                self.checked_add(rhs).ok_or(LaunchCurveError::MathOverflow)
            }

            fn safe_sub(self, rhs: Self) -> CoreResult<Self> {
                self.checked_sub(rhs).ok_or(LaunchCurveError::MathUnderflow)
            }

            fn safe_mul(self, rhs: Self) -> CoreResult<Self> {
                self.checked_mul(rhs).ok_or(LaunchCurveError::MathOverflow)
            }

            fn safe_div(self, rhs: Self) -> CoreResult<Self> {
                if rhs == $zero {
                    return Err(LaunchCurveError::DivisionByZero);
                }
                Ok(self / rhs)
            }

            fn safe_shl(self, shift: u32) -> CoreResult<Self> {
                let shifted = self.checked_shl(shift).ok_or(LaunchCurveError::MathOverflow)?;
                // checked_shl only rejects oversized shifts; bits pushed out are an overflow too
                if (shifted >> shift) != self {
                    return Err(LaunchCurveError::MathOverflow);
                }
                Ok(shifted)
            }

            fn safe_shr(self, shift: u32) -> CoreResult<Self> {
                self.checked_shr(shift).ok_or(LaunchCurveError::MathUnderflow)
            }
        }
    };
}

safe_arith!(u8, 0);
safe_arith!(u16, 0);
safe_arith!(u32, 0);
safe_arith!(u64, 0);
safe_arith!(u128, 0);
safe_arith!(U256, U256::ZERO);

/// Calculate `value * bps / 10_000`, rounding down
pub fn safe_calculate_bps(value: u64, bps: u64) -> CoreResult<u64> {
    if bps > BASIS_POINT_MAX {
        return Err(LaunchCurveError::invariant("basis points above 10000"));
    }
    mul_div_u64(value, bps, BASIS_POINT_MAX, Rounding::Down)
}
