//! # Protocol Constants
//!
//! Fundamental constants mirrored from the on-chain bonding-curve program:
//! - Fixed-point scales (Q64, Q128)
//! - Price bounds and curve limits
//! - Fee denominators and caps
//! - Fee split percentages

use crate::errors::CoreResult;
use crate::math::{mul_div_u64, Rounding};

// ============================================================================
// Mathematical Constants
// ============================================================================

/// Q64 fixed-point scale factor: 2^64
pub const ONE_Q64: u128 = 1u128 << 64;

/// Bit offset of the Q64 fractional part
pub const SCALE_OFFSET: u32 = 64;

/// Q128 shift used by quote-side curve deltas
pub const RESOLUTION: u32 = 128;

/// Basis points denominator (10,000 = 100%)
pub const BASIS_POINT_MAX: u64 = 10_000;

/// Upper bound (exclusive) on the exponent accepted by the Q64 power function
pub const MAX_EXPONENTIAL: u128 = 0x80000;

// ============================================================================
// Price Bounds
// ============================================================================

/// Minimum sqrt price in Q64 format
pub const MIN_SQRT_PRICE: u128 = 4_295_048_016;

/// Maximum sqrt price in Q64 format
pub const MAX_SQRT_PRICE: u128 = 79_226_673_521_066_979_257_578_248_091;

/// Maximum number of curve points a pool config may carry
pub const MAX_CURVE_POINT: usize = 20;

// ============================================================================
// Fee Structure Constants
// ============================================================================

/// Denominator of every fee numerator (1e9 = 100%)
pub const FEE_DENOMINATOR: u64 = 1_000_000_000;

/// Maximum total trading fee numerator (99%)
pub const MAX_FEE_NUMERATOR: u64 = 990_000_000;

/// Share of the trading fee routed to the protocol, in percent
pub const PROTOCOL_FEE_PERCENT: u8 = 20;

/// Share of the protocol fee routed to a referral account, in percent
pub const HOST_FEE_PERCENT: u8 = 20;

/// Maximum creator share of the trading fee, in percent
pub const MAX_CREATOR_TRADING_FEE_PERCENT: u8 = 100;

/// Scale applied to the squared volatility term of the dynamic fee
pub const DYNAMIC_FEE_SCALING_FACTOR: u128 = 100_000_000_000;

/// Rounding offset for the dynamic fee (ceil division by the scaling factor)
pub const DYNAMIC_FEE_ROUNDING_OFFSET: u128 = 99_999_999_999;

// ============================================================================
// Helper Functions
// ============================================================================

/// Convert a basis-point rate into a fee numerator over [`FEE_DENOMINATOR`]
pub fn bps_to_fee_numerator(bps: u64) -> CoreResult<u64> {
    mul_div_u64(bps, FEE_DENOMINATOR, BASIS_POINT_MAX, Rounding::Down)
}
