//! # Fee Split
//!
//! Fee mode resolution, fee extraction and the protocol / referral split.

use crate::constants::{FEE_DENOMINATOR, HOST_FEE_PERCENT, PROTOCOL_FEE_PERCENT};
use crate::errors::{CoreResult, LaunchCurveError};
use crate::math::{mul_div_u64, Rounding, SafeMath};
use crate::types::{CollectFeeMode, FeeBreakdown, TradeDirection};

/// Where the fee of a trade is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeMode {
    pub fees_on_input: bool,
    pub fees_on_base_token: bool,
    pub has_referral: bool,
}

impl FeeMode {
    pub fn get_fee_mode(
        collect_fee_mode: CollectFeeMode,
        direction: TradeDirection,
        has_referral: bool,
    ) -> Self {
        let (fees_on_input, fees_on_base_token) = match (collect_fee_mode, direction) {
            (CollectFeeMode::QuoteToken, TradeDirection::BaseToQuote) => (false, false),
            (CollectFeeMode::QuoteToken, TradeDirection::QuoteToBase) => (true, false),
            (CollectFeeMode::OutputToken, TradeDirection::BaseToQuote) => (false, false),
            (CollectFeeMode::OutputToken, TradeDirection::QuoteToBase) => (false, true),
        };
        Self {
            fees_on_input,
            fees_on_base_token,
            has_referral,
        }
    }
}

/// Amount left after the fee, and the split fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeOnAmount {
    pub amount: u64,
    pub fee: FeeBreakdown,
}

/// Take `ceil(amount * fee_numerator / FEE_DENOMINATOR)` from `amount`
pub fn get_fee_on_amount(
    amount: u64,
    fee_numerator: u64,
    has_referral: bool,
) -> CoreResult<FeeOnAmount> {
    let fee = mul_div_u64(amount, fee_numerator, FEE_DENOMINATOR, Rounding::Up)?;
    let amount = amount.safe_sub(fee)?;
    Ok(FeeOnAmount {
        amount,
        fee: split_fee(fee, has_referral)?,
    })
}

/// Split a nominal fee between partner/creator, protocol and referral
pub fn split_fee(fee: u64, has_referral: bool) -> CoreResult<FeeBreakdown> {
    let protocol = mul_div_u64(fee, u64::from(PROTOCOL_FEE_PERCENT), 100, Rounding::Down)?;
    let trading = fee.safe_sub(protocol)?;

    let referral = if has_referral {
        mul_div_u64(protocol, u64::from(HOST_FEE_PERCENT), 100, Rounding::Down)?
    } else {
        0
    };
    let protocol = protocol.safe_sub(referral)?;

    Ok(FeeBreakdown {
        trading,
        protocol,
        referral,
    })
}

/// Gross up a fee-excluded amount: returns `(included_amount, fee)`
pub fn get_included_fee_amount(fee_numerator: u64, excluded_amount: u64) -> CoreResult<(u64, u64)> {
    if fee_numerator >= FEE_DENOMINATOR {
        return Err(LaunchCurveError::invariant("fee numerator at or above 100%"));
    }
    let denominator = FEE_DENOMINATOR - fee_numerator;
    let included = mul_div_u64(excluded_amount, FEE_DENOMINATOR, denominator, Rounding::Up)?;
    let fee = included.safe_sub(excluded_amount)?;
    Ok((included, fee))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_mode_table() {
        let cases = [
            (CollectFeeMode::QuoteToken, TradeDirection::BaseToQuote, false, false),
            (CollectFeeMode::QuoteToken, TradeDirection::QuoteToBase, true, false),
            (CollectFeeMode::OutputToken, TradeDirection::BaseToQuote, false, false),
            (CollectFeeMode::OutputToken, TradeDirection::QuoteToBase, false, true),
        ];
        for (collect, direction, on_input, on_base) in cases {
            let mode = FeeMode::get_fee_mode(collect, direction, true);
            assert_eq!(mode.fees_on_input, on_input, "{collect:?} {direction:?}");
            assert_eq!(mode.fees_on_base_token, on_base, "{collect:?} {direction:?}");
            assert!(mode.has_referral);
        }
    }

    #[test]
    fn test_fee_on_amount() {
        // 1% of 1_000_000
        let result = get_fee_on_amount(1_000_000, 10_000_000, false).unwrap();
        assert_eq!(result.amount, 990_000);
        assert_eq!(result.fee.total(), 10_000);
        assert_eq!(result.fee.protocol, 2_000);
        assert_eq!(result.fee.trading, 8_000);
        assert_eq!(result.fee.referral, 0);

        // Fee rounds up
        let result = get_fee_on_amount(1, 10_000_000, false).unwrap();
        assert_eq!(result.amount, 0);
        assert_eq!(result.fee.total(), 1);
    }

    #[test]
    fn test_split_with_referral() {
        let fee = split_fee(10_000, true).unwrap();
        assert_eq!(fee.trading, 8_000);
        assert_eq!(fee.referral, 400);
        assert_eq!(fee.protocol, 1_600);
        assert_eq!(fee.total(), 10_000);
    }

    #[test]
    fn test_split_sums_to_fee() {
        for fee in [0u64, 1, 7, 99, 12_345, u64::MAX / 100] {
            for has_referral in [false, true] {
                assert_eq!(split_fee(fee, has_referral).unwrap().total(), fee);
            }
        }
    }

    #[test]
    fn test_included_fee_amount() {
        let (included, fee) = get_included_fee_amount(10_000_000, 990_000).unwrap();
        assert_eq!(included, 1_000_000);
        assert_eq!(fee, 10_000);

        // Charging the gross amount leaves at least the net amount
        let (included, _) = get_included_fee_amount(33_333_333, 777_777).unwrap();
        let charged = get_fee_on_amount(included, 33_333_333, false).unwrap();
        assert!(charged.amount >= 777_777);

        assert!(get_included_fee_amount(FEE_DENOMINATOR, 1).is_err());
    }
}
