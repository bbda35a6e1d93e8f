//! # Curve Builder Helpers
//!
//! Sizing helpers used when designing a curve: token amounts between the
//! start and migration prices, liquidity from target amounts, and conversions
//! between human prices and Q64 sqrt prices.

use ethnum::U256;

use crate::constants::{MAX_SQRT_PRICE, MIN_SQRT_PRICE, RESOLUTION, SCALE_OFFSET};
use crate::curve::walker::walk_curve;
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::{
    get_delta_amount_base_unsigned_256, get_delta_amount_quote_unsigned_256, shl_div, sqrt_u256,
    u256_to_u128, u256_to_u64, Rounding, SafeMath,
};
use crate::types::{lower_bound, CurvePoint, TradeDirection};

/// Base tokens sold by the curve between the start and migration prices
pub fn base_token_for_swap(
    sqrt_start_price: u128,
    migration_sqrt_price: u128,
    curve: &[CurvePoint],
) -> CoreResult<u64> {
    let mut total = U256::ZERO;
    for (index, point) in curve.iter().enumerate() {
        let lower = lower_bound(curve, index, sqrt_start_price);
        if lower >= migration_sqrt_price {
            break;
        }
        let upper = point.sqrt_price.min(migration_sqrt_price);
        let delta = get_delta_amount_base_unsigned_256(lower, upper, point.liquidity, Rounding::Up)?;
        total = total.safe_add(delta)?;
    }
    u256_to_u64(total)
}

/// Quote tokens absorbed by the curve between the start and migration prices
pub fn migration_quote_amount(
    sqrt_start_price: u128,
    migration_sqrt_price: u128,
    curve: &[CurvePoint],
) -> CoreResult<u64> {
    let mut total = U256::ZERO;
    for (index, point) in curve.iter().enumerate() {
        let lower = lower_bound(curve, index, sqrt_start_price);
        if lower >= migration_sqrt_price {
            break;
        }
        let upper = point.sqrt_price.min(migration_sqrt_price);
        let delta =
            get_delta_amount_quote_unsigned_256(lower, upper, point.liquidity, Rounding::Up)?;
        total = total.safe_add(delta)?;
    }
    u256_to_u64(total)
}

/// Sqrt price reached once `migration_quote_threshold` quote has been bought in
pub fn migration_sqrt_price_from_threshold(
    migration_quote_threshold: u64,
    sqrt_start_price: u128,
    curve: &[CurvePoint],
) -> CoreResult<u128> {
    let result = walk_curve(
        sqrt_start_price,
        curve,
        sqrt_start_price,
        migration_quote_threshold,
        TradeDirection::QuoteToBase,
        None,
    )?;
    if result.amount_left > 0 {
        return Err(LaunchCurveError::CurveExhausted);
    }
    Ok(result.next_sqrt_price)
}

/// L = Δquote * 2^128 / (sqrt_price - sqrt_min_price)
pub fn initial_liquidity_from_delta_quote(
    quote_amount: u64,
    sqrt_min_price: u128,
    sqrt_price: u128,
) -> CoreResult<u128> {
    let delta = sqrt_price.safe_sub(sqrt_min_price)?;
    shl_div(u128::from(quote_amount), delta, RESOLUTION, Rounding::Down)
}

/// L = Δbase * sqrt_price * sqrt_max_price / (sqrt_max_price - sqrt_price)
pub fn initial_liquidity_from_delta_base(
    base_amount: u64,
    sqrt_max_price: u128,
    sqrt_price: u128,
) -> CoreResult<u128> {
    let delta = U256::from(sqrt_max_price.safe_sub(sqrt_price)?);
    let product = U256::from(base_amount)
        .safe_mul(U256::from(sqrt_price))?
        .safe_mul(U256::from(sqrt_max_price))?;
    u256_to_u128(product.safe_div(delta)?)
}

fn decimals_factor(decimals: u8) -> CoreResult<U256> {
    10u128
        .checked_pow(u32::from(decimals))
        .map(U256::from)
        .ok_or(LaunchCurveError::MathOverflow)
}

/// Q64 sqrt price of a human price `numerator / denominator` (quote per base)
pub fn sqrt_price_from_price(
    price_numerator: u64,
    price_denominator: u64,
    base_decimals: u8,
    quote_decimals: u8,
) -> CoreResult<u128> {
    if price_denominator == 0 {
        return Err(LaunchCurveError::DivisionByZero);
    }

    // raw price in atoms, shifted to Q128 so its square root lands in Q64
    let numerator = U256::from(price_numerator)
        .safe_mul(decimals_factor(quote_decimals)?)?
        .safe_shl(RESOLUTION)?;
    let denominator = U256::from(price_denominator).safe_mul(decimals_factor(base_decimals)?)?;
    let sqrt_price = u256_to_u128(sqrt_u256(numerator.safe_div(denominator)?))?;

    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price) {
        return Err(LaunchCurveError::invariant("price out of bounds"));
    }
    Ok(sqrt_price)
}

/// Human price (quote per base) of a sqrt price, as Q64
pub fn price_from_sqrt_price(
    sqrt_price: u128,
    base_decimals: u8,
    quote_decimals: u8,
) -> CoreResult<u128> {
    let squared = U256::from(sqrt_price).safe_mul(U256::from(sqrt_price))?;
    let scaled = squared
        .safe_mul(decimals_factor(base_decimals)?)?
        .safe_div(decimals_factor(quote_decimals)?)?;
    u256_to_u128(scaled >> SCALE_OFFSET)
}
