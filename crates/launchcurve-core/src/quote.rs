//! # Swap Quote Engine
//!
//! Prices a swap against a pool snapshot: resolves the fee numerator and fee
//! mode, walks the curve and splits the fee. Snapshots are never mutated.

use ethnum::U256;
use tracing::debug;

use crate::constants::BASIS_POINT_MAX;
use crate::curve::walker::walk_curve;
use crate::errors::{CoreResult, LaunchCurveError};
use crate::fee::{
    cap_fee_numerator, get_fee_on_amount, get_included_fee_amount, get_total_fee_numerator,
    get_variable_fee_numerator, split_fee, FeeMode,
};
use crate::math::{
    get_delta_amount_quote_unsigned_256, safe_calculate_bps, u256_to_u64, Rounding, SafeMath,
};
use crate::types::{
    lower_bound, BaseFeeConfig, CurvePoint, FeeBreakdown, MigrationQuote, PoolConfig, QuoteResult,
    SwapMode, TradeDirection, VirtualPool,
};

const MAX_FEE_REFINEMENTS: usize = 8;

/// Exact-in quote
pub fn quote(
    pool: &VirtualPool,
    config: &PoolConfig,
    swap_base_for_quote: bool,
    amount_in: u64,
    slippage_bps: u64,
    has_referral: bool,
    current_point: u64,
) -> CoreResult<QuoteResult> {
    quote_with_mode(
        pool,
        config,
        swap_base_for_quote,
        amount_in,
        slippage_bps,
        has_referral,
        current_point,
        SwapMode::ExactIn,
    )
}

/// Quote with an explicit [`SwapMode`]
#[allow(clippy::too_many_arguments)]
pub fn quote_with_mode(
    pool: &VirtualPool,
    config: &PoolConfig,
    swap_base_for_quote: bool,
    amount_in: u64,
    slippage_bps: u64,
    has_referral: bool,
    current_point: u64,
    mode: SwapMode,
) -> CoreResult<QuoteResult> {
    if amount_in == 0 {
        return Err(LaunchCurveError::InvalidAmount);
    }
    if slippage_bps > BASIS_POINT_MAX {
        return Err(LaunchCurveError::InvalidSlippage(slippage_bps));
    }
    ensure_tradable(pool, config)?;

    let direction = TradeDirection::from_swap_base_for_quote(swap_base_for_quote);
    let fee_mode = FeeMode::get_fee_mode(config.collect_fee_mode, direction, has_referral);
    let fee_numerator =
        get_total_fee_numerator(config, pool, direction, amount_in, current_point)?;
    debug!(
        ?direction,
        ?mode,
        amount_in,
        fee_numerator,
        fees_on_input = fee_mode.fees_on_input,
        fees_on_base_token = fee_mode.fees_on_base_token,
        "resolved fee mode"
    );

    let (walk_amount, input_fee) = if fee_mode.fees_on_input {
        let charged = get_fee_on_amount(amount_in, fee_numerator, has_referral)?;
        (charged.amount, charged.fee)
    } else {
        (amount_in, FeeBreakdown::default())
    };

    let price_cap = match (mode, direction) {
        (SwapMode::PartialFill, TradeDirection::QuoteToBase) => Some(config.migration_sqrt_price),
        _ => None,
    };
    let walk = walk_curve(
        pool.sqrt_price,
        &config.curve,
        config.sqrt_start_price,
        walk_amount,
        direction,
        price_cap,
    )?;

    let mut consumed_in = amount_in;
    let mut input_fee = input_fee;
    if walk.amount_left > 0 {
        if price_cap.is_none() {
            return Err(LaunchCurveError::CurveExhausted);
        }
        // Partial fill: charge the fee only on what the curve absorbed
        let used = walk_amount.safe_sub(walk.amount_left)?;
        if fee_mode.fees_on_input {
            let (included, fee) = get_included_fee_amount(fee_numerator, used)?;
            consumed_in = included;
            input_fee = split_fee(fee, has_referral)?;
        } else {
            consumed_in = used;
        }
    }

    // The pool must hold the raw output
    let reserve = match direction {
        TradeDirection::BaseToQuote => pool.quote_reserve,
        TradeDirection::QuoteToBase => pool.base_reserve,
    };
    if walk.amount_out > reserve {
        return Err(LaunchCurveError::CurveExhausted);
    }

    let (amount_out, fee) = if fee_mode.fees_on_input {
        (walk.amount_out, input_fee)
    } else {
        let charged = get_fee_on_amount(walk.amount_out, fee_numerator, has_referral)?;
        (charged.amount, charged.fee)
    };

    let minimum_amount_out = safe_calculate_bps(amount_out, BASIS_POINT_MAX - slippage_bps)?;

    let next_quote_reserve = match direction {
        TradeDirection::BaseToQuote => pool.quote_reserve.safe_sub(walk.amount_out)?,
        TradeDirection::QuoteToBase => {
            let quote_added = if fee_mode.fees_on_input {
                consumed_in.safe_sub(fee.total())?
            } else {
                consumed_in
            };
            pool.quote_reserve.safe_add(quote_added)?
        }
    };

    let result = QuoteResult {
        amount_in: consumed_in,
        amount_out,
        minimum_amount_out,
        fee,
        fee_on_input: fee_mode.fees_on_input,
        fee_numerator,
        next_sqrt_price: walk.next_sqrt_price,
        segments_crossed: walk.segments_crossed,
        amount_left: amount_in.safe_sub(consumed_in)?,
        curve_complete: next_quote_reserve >= config.migration_quote_threshold,
    };
    debug!(
        amount_in = result.amount_in,
        amount_out = result.amount_out,
        fee = result.fee.total(),
        next_sqrt_price = result.next_sqrt_price,
        segments_crossed = result.segments_crossed,
        amount_left = result.amount_left,
        "quoted swap"
    );
    Ok(result)
}

/// Quote needed to buy the pool up to its migration price
pub fn quote_to_migration(
    pool: &VirtualPool,
    config: &PoolConfig,
    current_point: u64,
) -> CoreResult<MigrationQuote> {
    ensure_tradable(pool, config)?;

    let amount_in_excluded_fee = quote_to_price(
        pool.sqrt_price,
        &config.curve,
        config.sqrt_start_price,
        config.migration_sqrt_price,
    )?;
    if amount_in_excluded_fee == 0 {
        return Ok(MigrationQuote::default());
    }

    let direction = TradeDirection::QuoteToBase;
    let fee_mode = FeeMode::get_fee_mode(config.collect_fee_mode, direction, false);

    let walk = walk_curve(
        pool.sqrt_price,
        &config.curve,
        config.sqrt_start_price,
        amount_in_excluded_fee,
        direction,
        Some(config.migration_sqrt_price),
    )?;
    if walk.amount_out > pool.base_reserve {
        return Err(LaunchCurveError::CurveExhausted);
    }

    if fee_mode.fees_on_input {
        let (amount_in, fee, fee_numerator) =
            gross_up_input(pool, config, amount_in_excluded_fee, current_point)?;
        Ok(MigrationQuote {
            amount_in,
            amount_in_excluded_fee,
            amount_out: walk.amount_out,
            fee: split_fee(fee, false)?,
            fee_numerator,
        })
    } else {
        let fee_numerator = get_total_fee_numerator(
            config,
            pool,
            direction,
            amount_in_excluded_fee,
            current_point,
        )?;
        let charged = get_fee_on_amount(walk.amount_out, fee_numerator, false)?;
        Ok(MigrationQuote {
            amount_in: amount_in_excluded_fee,
            amount_in_excluded_fee,
            amount_out: charged.amount,
            fee: charged.fee,
            fee_numerator,
        })
    }
}

fn ensure_tradable(pool: &VirtualPool, config: &PoolConfig) -> CoreResult<()> {
    config.validate()?;
    pool.validate_against(config)?;
    if pool.is_migrated || pool.is_curve_complete(config.migration_quote_threshold) {
        return Err(LaunchCurveError::PoolCompleted);
    }
    Ok(())
}

/// Quote the walker needs to move from `current_sqrt_price` up to `target`
fn quote_to_price(
    current_sqrt_price: u128,
    curve: &[CurvePoint],
    sqrt_start_price: u128,
    target_sqrt_price: u128,
) -> CoreResult<u64> {
    let mut total = U256::ZERO;
    for (index, point) in curve.iter().enumerate() {
        let lower = lower_bound(curve, index, sqrt_start_price).max(current_sqrt_price);
        let upper = point.sqrt_price.min(target_sqrt_price);
        if upper <= lower {
            continue;
        }
        let delta =
            get_delta_amount_quote_unsigned_256(lower, upper, point.liquidity, Rounding::Up)?;
        total = total.safe_add(delta)?;
    }
    u256_to_u64(total)
}

/// Fee-inclusive input whose net amount covers `excluded`.
///
/// The rate limiter prices the fee-inclusive amount, so the numerator is
/// refined until it stops growing; if it does not settle, the limiter ceiling
/// is charged.
fn gross_up_input(
    pool: &VirtualPool,
    config: &PoolConfig,
    excluded: u64,
    current_point: u64,
) -> CoreResult<(u64, u64, u64)> {
    let direction = TradeDirection::QuoteToBase;
    let mut fee_numerator =
        get_total_fee_numerator(config, pool, direction, excluded, current_point)?;

    for _ in 0..MAX_FEE_REFINEMENTS {
        let (included, fee) = get_included_fee_amount(fee_numerator, excluded)?;
        let charged_numerator =
            get_total_fee_numerator(config, pool, direction, included, current_point)?;
        if charged_numerator <= fee_numerator {
            return Ok((included, fee, fee_numerator));
        }
        fee_numerator = charged_numerator;
    }

    if let BaseFeeConfig::RateLimiter(limiter) = &config.base_fee {
        fee_numerator = cap_fee_numerator(
            limiter.max_fee_numerator,
            get_variable_fee_numerator(config, pool)?,
        )?;
    }
    let (included, fee) = get_included_fee_amount(fee_numerator, excluded)?;
    Ok((included, fee, fee_numerator))
}
