//! Pool progress and fee readers.

use launchcurve_core::constants::BASIS_POINT_MAX;
use launchcurve_core::math::{mul_div_u64, Rounding};
use launchcurve_core::{PoolConfig, VirtualPool};
use serde::Serialize;

use crate::errors::SdkResult;

/// Unclaimed trading fees split between creator and partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TradingFeeShares {
    pub creator_base: u64,
    pub creator_quote: u64,
    pub partner_base: u64,
    pub partner_quote: u64,
}

/// Snapshot of a pool's progress towards migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolMetricsReport {
    /// Quote reserve over the migration threshold, capped at 10_000
    pub progress_bps: u64,
    pub quote_reserve: u64,
    pub migration_quote_threshold: u64,
    /// Quote still needed to reach the threshold
    pub quote_remaining: u64,
    pub is_complete: bool,
    pub total_trading_base_fee: u64,
    pub total_trading_quote_fee: u64,
    pub total_protocol_base_fee: u64,
    pub total_protocol_quote_fee: u64,
    pub unclaimed_trading_fees: TradingFeeShares,
}

impl PoolMetricsReport {
    pub fn to_json(&self) -> SdkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Curve progress in basis points
pub fn curve_progress_bps(pool: &VirtualPool, config: &PoolConfig) -> SdkResult<u64> {
    if pool.quote_reserve >= config.migration_quote_threshold {
        return Ok(BASIS_POINT_MAX);
    }
    Ok(mul_div_u64(
        pool.quote_reserve,
        BASIS_POINT_MAX,
        config.migration_quote_threshold,
        Rounding::Down,
    )?)
}

pub fn quote_remaining(pool: &VirtualPool, config: &PoolConfig) -> u64 {
    config
        .migration_quote_threshold
        .saturating_sub(pool.quote_reserve)
}

/// Split a trading fee amount: `(creator, partner)`
pub fn split_trading_fee(amount: u64, creator_trading_fee_percentage: u8) -> SdkResult<(u64, u64)> {
    let creator = mul_div_u64(
        amount,
        u64::from(creator_trading_fee_percentage),
        100,
        Rounding::Down,
    )?;
    Ok((creator, amount.saturating_sub(creator)))
}

pub fn pool_metrics(pool: &VirtualPool, config: &PoolConfig) -> SdkResult<PoolMetricsReport> {
    let share = config.creator_trading_fee_percentage;
    let (creator_base, partner_base) = split_trading_fee(pool.fees.trading_base_fee, share)?;
    let (creator_quote, partner_quote) = split_trading_fee(pool.fees.trading_quote_fee, share)?;

    Ok(PoolMetricsReport {
        progress_bps: curve_progress_bps(pool, config)?,
        quote_reserve: pool.quote_reserve,
        migration_quote_threshold: config.migration_quote_threshold,
        quote_remaining: quote_remaining(pool, config),
        is_complete: pool.is_migrated || pool.is_curve_complete(config.migration_quote_threshold),
        total_trading_base_fee: pool.metrics.total_trading_base_fee,
        total_trading_quote_fee: pool.metrics.total_trading_quote_fee,
        total_protocol_base_fee: pool.metrics.total_protocol_base_fee,
        total_protocol_quote_fee: pool.metrics.total_protocol_quote_fee,
        unclaimed_trading_fees: TradingFeeShares {
            creator_base,
            creator_quote,
            partner_base,
            partner_quote,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::pool_config;
    use launchcurve_core::{PoolFeeAccumulators, PoolMetrics};

    #[test]
    fn test_progress() {
        let config = pool_config();
        let mut pool = VirtualPool {
            quote_reserve: config.migration_quote_threshold / 4,
            ..Default::default()
        };
        assert_eq!(curve_progress_bps(&pool, &config).unwrap(), 2_500);
        assert_eq!(
            quote_remaining(&pool, &config),
            config.migration_quote_threshold - pool.quote_reserve
        );

        pool.quote_reserve = config.migration_quote_threshold + 1;
        assert_eq!(curve_progress_bps(&pool, &config).unwrap(), BASIS_POINT_MAX);
        assert_eq!(quote_remaining(&pool, &config), 0);
    }

    #[test]
    fn test_trading_fee_split() {
        assert_eq!(split_trading_fee(1_001, 50).unwrap(), (500, 501));
        assert_eq!(split_trading_fee(1_000, 0).unwrap(), (0, 1_000));
        assert_eq!(split_trading_fee(1_000, 100).unwrap(), (1_000, 0));
    }

    #[test]
    fn test_report() {
        let config = pool_config();
        let pool = VirtualPool {
            quote_reserve: config.migration_quote_threshold / 2,
            fees: PoolFeeAccumulators {
                trading_quote_fee: 800,
                trading_base_fee: 40,
                ..Default::default()
            },
            metrics: PoolMetrics {
                total_trading_quote_fee: 8_000,
                total_protocol_quote_fee: 2_000,
                ..Default::default()
            },
            ..Default::default()
        };

        let report = pool_metrics(&pool, &config).unwrap();
        assert_eq!(report.progress_bps, 5_000);
        assert!(!report.is_complete);
        assert_eq!(report.total_trading_quote_fee, 8_000);
        // 50% creator share in the fixture
        assert_eq!(report.unclaimed_trading_fees.creator_quote, 400);
        assert_eq!(report.unclaimed_trading_fees.partner_base, 20);

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["progress_bps"], 5_000);
        assert_eq!(value["unclaimed_trading_fees"]["partner_quote"], 400);
    }
}
