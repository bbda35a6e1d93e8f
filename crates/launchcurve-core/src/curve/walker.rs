//! # Curve Segment Walker
//!
//! Consumes an input amount across consecutive curve segments. Sells walk
//! down from the active segment, buys walk up. Inputs round up and outputs
//! round down inside every segment.

use ethnum::U256;
use tracing::trace;

use crate::constants::MAX_CURVE_POINT;
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::{
    get_delta_amount_base_unsigned, get_delta_amount_base_unsigned_256,
    get_delta_amount_quote_unsigned, get_delta_amount_quote_unsigned_256,
    get_next_sqrt_price_from_input, u256_to_u64, Rounding, SafeMath,
};
use crate::types::{lower_bound, CurvePoint, TradeDirection};

/// Outcome of a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkResult {
    /// Raw output, before any output-side fee
    pub amount_out: u64,
    pub next_sqrt_price: u128,
    pub segments_crossed: u32,
    /// Input the curve could not absorb
    pub amount_left: u64,
}

/// Walk `amount_in` through the curve from `current_sqrt_price`.
///
/// Buys stop at `price_cap` when one is given. Unabsorbed input is reported in
/// `amount_left`; use [`advance`] when it must be zero.
pub fn walk_curve(
    current_sqrt_price: u128,
    curve: &[CurvePoint],
    sqrt_start_price: u128,
    amount_in: u64,
    direction: TradeDirection,
    price_cap: Option<u128>,
) -> CoreResult<WalkResult> {
    if curve.len() > MAX_CURVE_POINT {
        return Err(LaunchCurveError::invariant("too many curve points"));
    }

    match direction {
        TradeDirection::BaseToQuote => walk_down(current_sqrt_price, curve, sqrt_start_price, amount_in),
        TradeDirection::QuoteToBase => walk_up(current_sqrt_price, curve, amount_in, price_cap),
    }
}

/// Exact-in walk: the whole input must be absorbed
pub fn advance(
    current_sqrt_price: u128,
    curve: &[CurvePoint],
    sqrt_start_price: u128,
    amount_in: u64,
    direction: TradeDirection,
) -> CoreResult<WalkResult> {
    let result = walk_curve(
        current_sqrt_price,
        curve,
        sqrt_start_price,
        amount_in,
        direction,
        None,
    )?;
    if result.amount_left > 0 {
        return Err(LaunchCurveError::CurveExhausted);
    }
    Ok(result)
}

fn walk_down(
    current_sqrt_price: u128,
    curve: &[CurvePoint],
    sqrt_start_price: u128,
    amount_in: u64,
) -> CoreResult<WalkResult> {
    let mut current = current_sqrt_price;
    let mut amount_left = amount_in;
    let mut amount_out: u64 = 0;
    let mut segments_crossed: u32 = 0;

    for index in (0..curve.len()).rev() {
        if amount_left == 0 {
            break;
        }
        let lower = lower_bound(curve, index, sqrt_start_price);
        if current <= lower {
            continue;
        }
        let liquidity = curve[index].liquidity;

        let max_amount_in =
            get_delta_amount_base_unsigned_256(lower, current, liquidity, Rounding::Up)?;
        if U256::from(amount_left) < max_amount_in {
            let next = get_next_sqrt_price_from_input(current, liquidity, amount_left, true)?;
            let output = get_delta_amount_quote_unsigned(next, current, liquidity, Rounding::Down)?;
            amount_out = amount_out.safe_add(output)?;
            current = next;
            amount_left = 0;
        } else {
            let output =
                get_delta_amount_quote_unsigned(lower, current, liquidity, Rounding::Down)?;
            amount_out = amount_out.safe_add(output)?;
            amount_left = amount_left.safe_sub(u256_to_u64(max_amount_in)?)?;
            current = lower;
            segments_crossed = segments_crossed.safe_add(1)?;
            trace!(segment = index, sqrt_price = current, amount_left, "crossed segment down");
        }
    }

    Ok(WalkResult {
        amount_out,
        next_sqrt_price: current,
        segments_crossed,
        amount_left,
    })
}

fn walk_up(
    current_sqrt_price: u128,
    curve: &[CurvePoint],
    amount_in: u64,
    price_cap: Option<u128>,
) -> CoreResult<WalkResult> {
    let mut current = current_sqrt_price;
    let mut amount_left = amount_in;
    let mut amount_out: u64 = 0;
    let mut segments_crossed: u32 = 0;

    for (index, point) in curve.iter().enumerate() {
        if amount_left == 0 {
            break;
        }
        let upper = match price_cap {
            Some(cap) if cap <= current => break,
            Some(cap) => point.sqrt_price.min(cap),
            None => point.sqrt_price,
        };
        if upper <= current {
            continue;
        }

        let max_amount_in =
            get_delta_amount_quote_unsigned_256(current, upper, point.liquidity, Rounding::Up)?;
        if U256::from(amount_left) < max_amount_in {
            let next = get_next_sqrt_price_from_input(current, point.liquidity, amount_left, false)?;
            let output =
                get_delta_amount_base_unsigned(current, next, point.liquidity, Rounding::Down)?;
            amount_out = amount_out.safe_add(output)?;
            current = next;
            amount_left = 0;
        } else {
            let output =
                get_delta_amount_base_unsigned(current, upper, point.liquidity, Rounding::Down)?;
            amount_out = amount_out.safe_add(output)?;
            amount_left = amount_left.safe_sub(u256_to_u64(max_amount_in)?)?;
            current = upper;
            segments_crossed = segments_crossed.safe_add(1)?;
            trace!(segment = index, sqrt_price = current, amount_left, "crossed segment up");
        }
    }

    Ok(WalkResult {
        amount_out,
        next_sqrt_price: current,
        segments_crossed,
        amount_left,
    })
}
