//! # Fee Scheduler
//!
//! Base fee that decays from a cliff value over discrete periods. Periods are
//! counted either in activation points or in sqrt-price steps above the start
//! price.

use ethnum::U256;

use crate::constants::{BASIS_POINT_MAX, MAX_FEE_NUMERATOR, ONE_Q64, SCALE_OFFSET};
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::{mul_div_u64, pow, u256_to_u128, u256_to_u64, Rounding, SafeMath};
use crate::types::{FeeScheduler, FeeSchedulerMode, PeriodSource};

/// Fee numerator after `period` decay periods
pub fn get_fee_in_period(
    cliff_fee_numerator: u64,
    reduction_factor: u64,
    period: u64,
    mode: FeeSchedulerMode,
) -> CoreResult<u64> {
    match mode {
        FeeSchedulerMode::Constant => Ok(cliff_fee_numerator),
        FeeSchedulerMode::Linear => {
            let reduction = period.safe_mul(reduction_factor)?;
            if reduction > cliff_fee_numerator {
                Ok(0)
            } else {
                cliff_fee_numerator.safe_sub(reduction)
            }
        }
        FeeSchedulerMode::Exponential => {
            get_exponential_fee(cliff_fee_numerator, reduction_factor, period)
        }
    }
}

fn get_exponential_fee(
    cliff_fee_numerator: u64,
    reduction_factor: u64,
    period: u64,
) -> CoreResult<u64> {
    if reduction_factor >= BASIS_POINT_MAX {
        return Err(LaunchCurveError::invariant(
            "exponential reduction factor must be below 10000 bps",
        ));
    }

    match period {
        0 => Ok(cliff_fee_numerator),
        1 => mul_div_u64(
            cliff_fee_numerator,
            BASIS_POINT_MAX - reduction_factor,
            BASIS_POINT_MAX,
            Rounding::Down,
        ),
        _ => {
            let decay = (u128::from(reduction_factor) << SCALE_OFFSET)
                .safe_div(u128::from(BASIS_POINT_MAX))?;
            let base = ONE_Q64.safe_sub(decay)?;
            let factor = pow(base, u128::from(period))?;

            let fee = U256::from(cliff_fee_numerator).safe_mul(U256::from(factor))?;
            u256_to_u64(fee >> SCALE_OFFSET)
        }
    }
}

impl FeeScheduler {
    /// Number of elapsed periods, capped at `number_of_period`
    pub fn get_period(
        &self,
        current_point: u64,
        activation_point: u64,
        sqrt_start_price: u128,
        current_sqrt_price: u128,
    ) -> CoreResult<u64> {
        let max_period = u64::from(self.number_of_period);

        // Trades before activation (alpha vault) pay the fully decayed fee
        if current_point < activation_point {
            return Ok(max_period);
        }

        match self.period_source {
            PeriodSource::Time { period_frequency } => {
                if period_frequency == 0 {
                    return Ok(0);
                }
                let elapsed = current_point.safe_sub(activation_point)?;
                Ok(elapsed.safe_div(period_frequency)?.min(max_period))
            }
            PeriodSource::MarketCap {
                sqrt_price_step_bps,
                scheduler_expiration_duration,
            } => {
                let expiration = activation_point.saturating_add(scheduler_expiration_duration);
                if current_point > expiration {
                    return Ok(max_period);
                }
                if current_sqrt_price <= sqrt_start_price || sqrt_price_step_bps == 0 {
                    return Ok(0);
                }

                let delta = U256::from(current_sqrt_price.safe_sub(sqrt_start_price)?);
                let steps = delta
                    .safe_mul(U256::from(BASIS_POINT_MAX))?
                    .safe_div(U256::from(sqrt_start_price))?
                    .safe_div(U256::from(sqrt_price_step_bps))?;
                let steps = u256_to_u128(steps.min(U256::from(max_period)))?;
                Ok(steps as u64)
            }
        }
    }

    /// Base fee numerator at the given point and price
    pub fn get_base_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
        sqrt_start_price: u128,
        current_sqrt_price: u128,
    ) -> CoreResult<u64> {
        let period = self.get_period(
            current_point,
            activation_point,
            sqrt_start_price,
            current_sqrt_price,
        )?;
        get_fee_in_period(
            self.cliff_fee_numerator,
            self.reduction_factor,
            period,
            self.mode,
        )
    }

    /// Fully decayed fee numerator
    pub fn get_min_base_fee_numerator(&self) -> CoreResult<u64> {
        get_fee_in_period(
            self.cliff_fee_numerator,
            self.reduction_factor,
            u64::from(self.number_of_period),
            self.mode,
        )
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.cliff_fee_numerator > MAX_FEE_NUMERATOR {
            return Err(LaunchCurveError::invariant("cliff fee above maximum"));
        }
        if self.mode == FeeSchedulerMode::Exponential && self.reduction_factor >= BASIS_POINT_MAX {
            return Err(LaunchCurveError::invariant(
                "exponential reduction factor must be below 10000 bps",
            ));
        }

        let decays = self.mode != FeeSchedulerMode::Constant && self.number_of_period > 0;
        if decays {
            if let PeriodSource::MarketCap {
                sqrt_price_step_bps,
                ..
            } = self.period_source
            {
                if sqrt_price_step_bps == 0 {
                    return Err(LaunchCurveError::invariant("zero market cap step"));
                }
            }
        }

        // Every period must be computable
        self.get_min_base_fee_numerator()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time_scheduler(mode: FeeSchedulerMode, period_frequency: u64) -> FeeScheduler {
        FeeScheduler {
            cliff_fee_numerator: 500_000_000,
            number_of_period: 10,
            reduction_factor: 1_000,
            mode,
            period_source: PeriodSource::Time { period_frequency },
        }
    }

    #[test]
    fn test_constant_fee() {
        for period in [0, 1, 7, 1_000] {
            assert_eq!(
                get_fee_in_period(500, 50, period, FeeSchedulerMode::Constant).unwrap(),
                500
            );
        }
    }

    #[test]
    fn test_linear_fee() {
        assert_eq!(get_fee_in_period(500, 50, 0, FeeSchedulerMode::Linear).unwrap(), 500);
        assert_eq!(get_fee_in_period(500, 50, 5, FeeSchedulerMode::Linear).unwrap(), 250);
        assert_eq!(get_fee_in_period(500, 50, 10, FeeSchedulerMode::Linear).unwrap(), 0);
        assert_eq!(get_fee_in_period(500, 50, 11, FeeSchedulerMode::Linear).unwrap(), 0);
    }

    #[test]
    fn test_linear_overflow() {
        assert_eq!(
            get_fee_in_period(500, u64::MAX, 2, FeeSchedulerMode::Linear),
            Err(LaunchCurveError::MathOverflow)
        );
    }

    #[test]
    fn test_exponential_fee() {
        let mode = FeeSchedulerMode::Exponential;
        assert_eq!(get_fee_in_period(1_000, 1_000, 0, mode).unwrap(), 1_000);
        assert_eq!(get_fee_in_period(1_000, 1_000, 1, mode).unwrap(), 900);

        // 1000 * 0.9^2 = 810, Q64 truncation may shave one unit
        let second = get_fee_in_period(1_000, 1_000, 2, mode).unwrap();
        assert!(second == 810 || second == 809);

        let mut previous = u64::MAX;
        for period in 0..50 {
            let fee = get_fee_in_period(100_000_000, 500, period, mode).unwrap();
            assert!(fee <= previous);
            previous = fee;
        }
    }

    #[test]
    fn test_exponential_period_one_matches_pow_path() {
        let decay = (1_000u128 << SCALE_OFFSET) / u128::from(BASIS_POINT_MAX);
        let factor = pow(ONE_Q64 - decay, 1).unwrap();
        let via_pow = ((U256::from(1_000u64) * U256::from(factor)) >> SCALE_OFFSET).as_u64();
        assert_eq!(via_pow, 900);
        assert_eq!(
            get_fee_in_period(1_000, 1_000, 1, FeeSchedulerMode::Exponential).unwrap(),
            via_pow
        );
    }

    #[test]
    fn test_exponential_rejects_full_reduction() {
        assert!(get_fee_in_period(1_000, 10_000, 1, FeeSchedulerMode::Exponential).is_err());

        let mut scheduler = time_scheduler(FeeSchedulerMode::Exponential, 10);
        scheduler.reduction_factor = 10_000;
        assert!(scheduler.validate().is_err());
    }

    #[test]
    fn test_time_period() {
        let scheduler = time_scheduler(FeeSchedulerMode::Linear, 10);
        // Before activation: fully decayed
        assert_eq!(scheduler.get_period(50, 100, 0, 0).unwrap(), 10);
        assert_eq!(scheduler.get_period(100, 100, 0, 0).unwrap(), 0);
        assert_eq!(scheduler.get_period(135, 100, 0, 0).unwrap(), 3);
        assert_eq!(scheduler.get_period(10_000, 100, 0, 0).unwrap(), 10);

        let frozen = time_scheduler(FeeSchedulerMode::Linear, 0);
        assert_eq!(frozen.get_period(10_000, 100, 0, 0).unwrap(), 0);
    }

    #[test]
    fn test_market_cap_period() {
        let scheduler = FeeScheduler {
            period_source: PeriodSource::MarketCap {
                sqrt_price_step_bps: 100,
                scheduler_expiration_duration: 1_000,
            },
            ..time_scheduler(FeeSchedulerMode::Linear, 0)
        };
        let start = ONE_Q64;

        assert_eq!(scheduler.get_period(10, 0, start, start).unwrap(), 0);
        // +3.5% sqrt price = 3 full steps of 1%
        let grown = start + start * 35 / 1_000;
        assert_eq!(scheduler.get_period(10, 0, start, grown).unwrap(), 3);
        assert_eq!(scheduler.get_period(10, 0, start, start * 2).unwrap(), 10);
        // Expired
        assert_eq!(scheduler.get_period(1_001, 0, start, start).unwrap(), 10);
    }

    #[test]
    fn test_base_fee_numerator() {
        let scheduler = time_scheduler(FeeSchedulerMode::Linear, 10);
        // cliff 5e8, rf 1000 per period
        assert_eq!(
            scheduler.get_base_fee_numerator(130, 100, 0, 0).unwrap(),
            500_000_000 - 3_000
        );
        assert_eq!(
            scheduler.get_min_base_fee_numerator().unwrap(),
            500_000_000 - 10_000
        );
    }

    #[test]
    fn test_validate() {
        assert!(time_scheduler(FeeSchedulerMode::Linear, 10).validate().is_ok());

        let mut scheduler = time_scheduler(FeeSchedulerMode::Constant, 0);
        scheduler.cliff_fee_numerator = MAX_FEE_NUMERATOR + 1;
        assert!(scheduler.validate().is_err());

        let scheduler = FeeScheduler {
            period_source: PeriodSource::MarketCap {
                sqrt_price_step_bps: 0,
                scheduler_expiration_duration: 10,
            },
            ..time_scheduler(FeeSchedulerMode::Linear, 0)
        };
        assert!(scheduler.validate().is_err());
    }
}
