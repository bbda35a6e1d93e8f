//! # Fee Calculations
//!
//! Base fee (scheduler or rate limiter), volatility surcharge and the split of
//! the collected fee.

pub mod dynamic;
pub mod rate_limiter;
pub mod scheduler;
pub mod split;

pub use scheduler::get_fee_in_period;
pub use split::*;

use crate::constants::MAX_FEE_NUMERATOR;
use crate::errors::CoreResult;
use crate::math::SafeMath;
use crate::types::{BaseFeeConfig, CollectFeeMode, PoolConfig, TradeDirection, VirtualPool};

impl BaseFeeConfig {
    /// Base fee numerator for a trade of `input_amount` (fee included)
    pub fn get_base_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
        direction: TradeDirection,
        input_amount: u64,
        sqrt_start_price: u128,
        current_sqrt_price: u128,
    ) -> CoreResult<u64> {
        match self {
            BaseFeeConfig::FeeScheduler(scheduler) => scheduler.get_base_fee_numerator(
                current_point,
                activation_point,
                sqrt_start_price,
                current_sqrt_price,
            ),
            BaseFeeConfig::RateLimiter(limiter) => limiter.get_base_fee_numerator(
                current_point,
                activation_point,
                direction,
                input_amount,
            ),
        }
    }

    pub fn validate(&self, collect_fee_mode: CollectFeeMode) -> CoreResult<()> {
        match self {
            BaseFeeConfig::FeeScheduler(scheduler) => scheduler.validate(),
            BaseFeeConfig::RateLimiter(limiter) => limiter.validate(collect_fee_mode),
        }
    }
}

/// Base plus variable fee, capped at [`MAX_FEE_NUMERATOR`]
pub fn get_total_fee_numerator(
    config: &PoolConfig,
    pool: &VirtualPool,
    direction: TradeDirection,
    input_amount: u64,
    current_point: u64,
) -> CoreResult<u64> {
    let base_fee_numerator = config.base_fee.get_base_fee_numerator(
        current_point,
        pool.activation_point,
        direction,
        input_amount,
        config.sqrt_start_price,
        pool.sqrt_price,
    )?;

    cap_fee_numerator(base_fee_numerator, get_variable_fee_numerator(config, pool)?)
}

/// Volatility surcharge, zero when the dynamic fee is off
pub fn get_variable_fee_numerator(config: &PoolConfig, pool: &VirtualPool) -> CoreResult<u128> {
    match &config.dynamic_fee {
        Some(dynamic_fee) => dynamic_fee.get_variable_fee_numerator(&pool.volatility_tracker),
        None => Ok(0),
    }
}

/// base + variable, capped at [`MAX_FEE_NUMERATOR`]
pub fn cap_fee_numerator(base_fee_numerator: u64, variable_fee_numerator: u128) -> CoreResult<u64> {
    let total = u128::from(base_fee_numerator).safe_add(variable_fee_numerator)?;
    Ok(total.min(u128::from(MAX_FEE_NUMERATOR)) as u64)
}
