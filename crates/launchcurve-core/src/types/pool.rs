//! # Virtual Pool Types
//!
//! Read-only snapshot of a curve-backed pool as fetched from chain.

use crate::errors::{CoreResult, LaunchCurveError};
use crate::types::config::PoolConfig;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Volatility state feeding the dynamic fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct VolatilityTracker {
    pub last_update_timestamp: u64,
    pub sqrt_price_reference: u128,
    pub volatility_accumulator: u128,
}

/// Unclaimed fees held by the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PoolFeeAccumulators {
    pub protocol_base_fee: u64,
    pub protocol_quote_fee: u64,
    pub trading_base_fee: u64,
    pub trading_quote_fee: u64,
}

/// Lifetime fee totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PoolMetrics {
    pub total_protocol_base_fee: u64,
    pub total_protocol_quote_fee: u64,
    pub total_trading_base_fee: u64,
    pub total_trading_quote_fee: u64,
}

/// Virtual pool snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct VirtualPool {
    pub base_reserve: u64,
    pub quote_reserve: u64,
    pub sqrt_price: u128,
    pub activation_point: u64,
    pub volatility_tracker: VolatilityTracker,
    pub fees: PoolFeeAccumulators,
    pub metrics: PoolMetrics,
    pub is_migrated: bool,
}

impl VirtualPool {
    /// True once the quote reserve reached the migration threshold
    pub fn is_curve_complete(&self, migration_quote_threshold: u64) -> bool {
        self.quote_reserve >= migration_quote_threshold
    }

    /// The snapshot's price must sit on the config's curve
    pub fn validate_against(&self, config: &PoolConfig) -> CoreResult<()> {
        if self.sqrt_price < config.sqrt_start_price {
            return Err(LaunchCurveError::InconsistentPoolState(
                "sqrt price below curve start",
            ));
        }
        if self.sqrt_price > config.max_sqrt_price() {
            return Err(LaunchCurveError::InconsistentPoolState(
                "sqrt price above last curve point",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_completion() {
        let pool = VirtualPool {
            quote_reserve: 1_000,
            ..Default::default()
        };
        assert!(pool.is_curve_complete(1_000));
        assert!(pool.is_curve_complete(999));
        assert!(!pool.is_curve_complete(1_001));
    }
}
