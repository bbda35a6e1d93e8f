//! # Rate Limiter
//!
//! Size-dependent base fee for buys right after launch. The input is cut into
//! `reference_amount` chunks; the first chunk pays the cliff fee and every
//! further chunk pays `fee_increment` more, until the ceiling is reached.

use ethnum::U256;

use crate::constants::{bps_to_fee_numerator, BASIS_POINT_MAX, MAX_FEE_NUMERATOR};
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::{div_rounding, u256_to_u64, Rounding, SafeMath};
use crate::types::{CollectFeeMode, RateLimiterConfig, TradeDirection};

impl RateLimiterConfig {
    /// A limiter with no reference, duration or increment never applies
    pub fn is_inert(&self) -> bool {
        self.reference_amount == 0 && self.max_limiter_duration == 0 && self.fee_increment_bps == 0
    }

    /// Buys inside `[activation_point, activation_point + max_limiter_duration]`
    pub fn is_applied(
        &self,
        current_point: u64,
        activation_point: u64,
        direction: TradeDirection,
    ) -> bool {
        if self.is_inert() || direction == TradeDirection::BaseToQuote {
            return false;
        }
        let last_effective_point = activation_point.saturating_add(self.max_limiter_duration);
        current_point >= activation_point && current_point <= last_effective_point
    }

    /// Per-chunk fee increment as a numerator
    pub fn fee_increment_numerator(&self) -> CoreResult<u64> {
        bps_to_fee_numerator(u64::from(self.fee_increment_bps))
    }

    /// Last chunk index still below the ceiling
    pub fn max_index(&self) -> CoreResult<u64> {
        let delta = self.max_fee_numerator.safe_sub(self.cliff_fee_numerator)?;
        delta.safe_div(self.fee_increment_numerator()?)
    }

    /// Average fee numerator charged on `input_amount` (fee included)
    pub fn get_fee_numerator_from_included_amount(&self, input_amount: u64) -> CoreResult<u64> {
        if input_amount <= self.reference_amount {
            return Ok(self.cliff_fee_numerator);
        }

        let c = U256::from(self.cliff_fee_numerator);
        let i = U256::from(self.fee_increment_numerator()?);
        let x0 = U256::from(self.reference_amount);
        let max_index = self.max_index()?;

        let x = input_amount.safe_sub(self.reference_amount)?;
        let a = x.safe_div(self.reference_amount)?;
        let b = U256::from(x % self.reference_amount);

        let trading_fee = if a < max_index {
            let a = U256::from(a);
            let a_plus_one = a.safe_add(U256::ONE)?;
            // x0 * (c * (a + 1) + i * a * (a + 1) / 2)
            let numerator_1 = c
                .safe_mul(a_plus_one)?
                .safe_add(i.safe_mul(a)?.safe_mul(a_plus_one)?.safe_div(U256::from(2u8))?)?;
            // b * (c + i * (a + 1))
            let numerator_2 = c.safe_add(i.safe_mul(a_plus_one)?)?;

            x0.safe_mul(numerator_1)?
                .safe_add(b.safe_mul(numerator_2)?)?
        } else {
            let m = U256::from(max_index);
            let m_plus_one = m.safe_add(U256::ONE)?;
            let numerator_1 = c
                .safe_mul(m_plus_one)?
                .safe_add(i.safe_mul(m)?.safe_mul(m_plus_one)?.safe_div(U256::from(2u8))?)?;
            let first_fee = x0.safe_mul(numerator_1)?;

            // Remaining amount pays the ceiling
            let d = U256::from(a.safe_sub(max_index)?);
            let left_amount = d.safe_mul(x0)?.safe_add(b)?;
            let second_fee = left_amount.safe_mul(U256::from(self.max_fee_numerator))?;

            first_fee.safe_add(second_fee)?
        };

        let numerator = div_rounding(trading_fee, U256::from(input_amount), Rounding::Up)?;
        u256_to_u64(numerator)
    }

    /// Base fee numerator for a trade
    pub fn get_base_fee_numerator(
        &self,
        current_point: u64,
        activation_point: u64,
        direction: TradeDirection,
        input_amount: u64,
    ) -> CoreResult<u64> {
        if self.is_applied(current_point, activation_point, direction) {
            self.get_fee_numerator_from_included_amount(input_amount)
        } else {
            Ok(self.cliff_fee_numerator)
        }
    }

    pub fn validate(&self, collect_fee_mode: CollectFeeMode) -> CoreResult<()> {
        if collect_fee_mode != CollectFeeMode::QuoteToken {
            return Err(LaunchCurveError::invariant(
                "rate limiter requires quote token fee collection",
            ));
        }
        if self.cliff_fee_numerator > self.max_fee_numerator
            || self.max_fee_numerator > MAX_FEE_NUMERATOR
        {
            return Err(LaunchCurveError::invariant("rate limiter fee bounds out of order"));
        }
        if self.is_inert() {
            return Ok(());
        }
        if self.fee_increment_bps == 0 || u64::from(self.fee_increment_bps) > BASIS_POINT_MAX {
            return Err(LaunchCurveError::invariant("invalid rate limiter fee increment"));
        }
        if self.reference_amount == 0 {
            return Err(LaunchCurveError::invariant("zero rate limiter reference amount"));
        }
        Ok(())
    }
}
