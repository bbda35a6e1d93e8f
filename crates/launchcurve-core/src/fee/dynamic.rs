//! # Dynamic Fee
//!
//! Volatility surcharge added on top of the base fee.

use crate::constants::{DYNAMIC_FEE_ROUNDING_OFFSET, DYNAMIC_FEE_SCALING_FACTOR};
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::SafeMath;
use crate::types::{DynamicFeeConfig, VolatilityTracker};

impl DynamicFeeConfig {
    /// ceil((volatility_accumulator * bin_step)^2 * variable_fee_control / 1e11)
    pub fn get_variable_fee_numerator(&self, tracker: &VolatilityTracker) -> CoreResult<u128> {
        let volatility = tracker
            .volatility_accumulator
            .min(u128::from(self.max_volatility_accumulator));

        let square_vfa_bin = volatility
            .safe_mul(u128::from(self.bin_step))?
            .checked_pow(2)
            .ok_or(LaunchCurveError::MathOverflow)?;
        let v_fee = square_vfa_bin.safe_mul(u128::from(self.variable_fee_control))?;

        v_fee
            .safe_add(DYNAMIC_FEE_ROUNDING_OFFSET)?
            .safe_div(DYNAMIC_FEE_SCALING_FACTOR)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.bin_step == 0 {
            return Err(LaunchCurveError::invariant("zero dynamic fee bin step"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(volatility_accumulator: u128) -> VolatilityTracker {
        VolatilityTracker {
            volatility_accumulator,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_volatility() {
        let config = DynamicFeeConfig {
            bin_step: 1,
            variable_fee_control: 100_000,
            max_volatility_accumulator: 1_000_000,
        };
        assert_eq!(config.get_variable_fee_numerator(&tracker(0)).unwrap(), 0);
    }

    #[test]
    fn test_rounds_up() {
        let config = DynamicFeeConfig {
            bin_step: 1,
            variable_fee_control: 1,
            max_volatility_accumulator: u32::MAX,
        };
        // 1^2 * 1 / 1e11 -> 1 after ceil
        assert_eq!(config.get_variable_fee_numerator(&tracker(1)).unwrap(), 1);
        // (100_000)^2 * 10 / 1e11 = 1 exactly
        let config = DynamicFeeConfig {
            variable_fee_control: 10,
            ..config
        };
        assert_eq!(config.get_variable_fee_numerator(&tracker(100_000)).unwrap(), 1);
    }

    #[test]
    fn test_accumulator_capped() {
        let config = DynamicFeeConfig {
            bin_step: 10,
            variable_fee_control: 1_000,
            max_volatility_accumulator: 50_000,
        };
        assert_eq!(
            config.get_variable_fee_numerator(&tracker(u128::MAX)).unwrap(),
            config.get_variable_fee_numerator(&tracker(50_000)).unwrap()
        );
    }

    #[test]
    fn test_validate() {
        let config = DynamicFeeConfig {
            bin_step: 0,
            variable_fee_control: 1,
            max_volatility_accumulator: 1,
        };
        assert!(config.validate().is_err());
    }
}
