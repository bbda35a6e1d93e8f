//! # Pool Config Types
//!
//! Immutable pool-config snapshot: the price curve, fee parameters and the
//! migration target. A config is fixed at creation; the engine only reads it.

use crate::constants::{
    MAX_CREATOR_TRADING_FEE_PERCENT, MAX_CURVE_POINT, MAX_SQRT_PRICE, MIN_SQRT_PRICE,
};
use crate::errors::{CoreResult, LaunchCurveError};

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Side of the trade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum TradeDirection {
    /// Sell base, receive quote (price moves down)
    BaseToQuote,
    /// Spend quote, receive base (price moves up)
    QuoteToBase,
}

impl TradeDirection {
    pub fn from_swap_base_for_quote(swap_base_for_quote: bool) -> Self {
        if swap_base_for_quote {
            Self::BaseToQuote
        } else {
            Self::QuoteToBase
        }
    }
}

/// Which token the trading fee is collected in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum CollectFeeMode {
    /// Always collect in the quote token (input on buys, output on sells)
    #[default]
    QuoteToken,
    /// Collect in whatever token the trader receives
    OutputToken,
}

/// Token program owning a mint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum TokenType {
    #[default]
    SplToken,
    Token2022,
}

/// Unit of activation and fee-period points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum ActivationType {
    #[default]
    Slot,
    Timestamp,
}

/// One segment boundary of the price curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct CurvePoint {
    /// Upper sqrt price of the segment (Q64)
    pub sqrt_price: u128,
    /// Liquidity active below `sqrt_price` down to the previous point
    pub liquidity: u128,
}

impl CurvePoint {
    pub const fn new(sqrt_price: u128, liquidity: u128) -> Self {
        Self {
            sqrt_price,
            liquidity,
        }
    }
}

/// Decay shape of a fee scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum FeeSchedulerMode {
    /// fee = cliff
    Constant,
    /// fee = cliff - period * reduction_factor, floored at zero
    Linear,
    /// fee = cliff * (1 - reduction_factor / 10_000) ^ period
    Exponential,
}

/// How elapsed fee periods are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum PeriodSource {
    /// One period per `period_frequency` points after activation
    Time { period_frequency: u64 },
    /// One period per `sqrt_price_step_bps` of sqrt price growth over the
    /// start price; fully decayed after `scheduler_expiration_duration` points
    MarketCap {
        sqrt_price_step_bps: u64,
        scheduler_expiration_duration: u64,
    },
}

/// Decaying base fee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct FeeScheduler {
    pub cliff_fee_numerator: u64,
    pub number_of_period: u16,
    pub reduction_factor: u64,
    pub mode: FeeSchedulerMode,
    pub period_source: PeriodSource,
}

/// Size-dependent base fee for buys shortly after launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct RateLimiterConfig {
    /// Fee for amounts up to `reference_amount`, and the floor of the mode
    pub cliff_fee_numerator: u64,
    /// Fee added per further `reference_amount` chunk, in basis points
    pub fee_increment_bps: u16,
    pub reference_amount: u64,
    /// Points after activation during which the limiter is active
    pub max_limiter_duration: u64,
    /// Ceiling of the mode
    pub max_fee_numerator: u64,
}

/// Base fee mode, selected once at config creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum BaseFeeConfig {
    FeeScheduler(FeeScheduler),
    RateLimiter(RateLimiterConfig),
}

/// Volatility surcharge parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct DynamicFeeConfig {
    pub bin_step: u16,
    pub variable_fee_control: u32,
    pub max_volatility_accumulator: u32,
}

/// Pool config snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct PoolConfig {
    /// Ascending curve points; segment 0 starts at `sqrt_start_price`
    pub curve: Vec<CurvePoint>,
    pub sqrt_start_price: u128,
    /// Quote reserve at which the curve is complete
    pub migration_quote_threshold: u64,
    /// Sqrt price reached when the migration threshold is filled
    pub migration_sqrt_price: u128,
    pub base_fee: BaseFeeConfig,
    pub dynamic_fee: Option<DynamicFeeConfig>,
    pub collect_fee_mode: CollectFeeMode,
    pub activation_type: ActivationType,
    pub base_token_type: TokenType,
    pub quote_token_type: TokenType,
    pub base_decimals: u8,
    pub quote_decimals: u8,
    /// Creator's share of the trading fee, in percent
    pub creator_trading_fee_percentage: u8,
}

impl PoolConfig {
    /// Lower sqrt price bound of segment `index`
    pub fn segment_lower_bound(&self, index: usize) -> u128 {
        lower_bound(&self.curve, index, self.sqrt_start_price)
    }

    /// Highest sqrt price the curve covers
    pub fn max_sqrt_price(&self) -> u128 {
        self.curve
            .last()
            .map(|point| point.sqrt_price)
            .unwrap_or(self.sqrt_start_price)
    }

    /// Check the structural and fee invariants of the config
    pub fn validate(&self) -> CoreResult<()> {
        validate_curve(&self.curve, self.sqrt_start_price)?;

        if self.migration_quote_threshold == 0 {
            return Err(LaunchCurveError::invariant("zero migration quote threshold"));
        }
        if self.migration_sqrt_price <= self.sqrt_start_price
            || self.migration_sqrt_price > self.max_sqrt_price()
        {
            return Err(LaunchCurveError::invariant(
                "migration sqrt price outside the curve",
            ));
        }
        if self.creator_trading_fee_percentage > MAX_CREATOR_TRADING_FEE_PERCENT {
            return Err(LaunchCurveError::invariant("creator fee share above 100%"));
        }

        self.base_fee.validate(self.collect_fee_mode)?;
        if let Some(dynamic_fee) = &self.dynamic_fee {
            dynamic_fee.validate()?;
        }
        Ok(())
    }
}

/// Lower sqrt price bound of segment `index` of `curve`
pub fn lower_bound(curve: &[CurvePoint], index: usize, sqrt_start_price: u128) -> u128 {
    if index == 0 {
        sqrt_start_price
    } else {
        curve[index - 1].sqrt_price
    }
}

/// Thresholds strictly increasing, inside the global price bounds, every
/// segment funded
pub fn validate_curve(curve: &[CurvePoint], sqrt_start_price: u128) -> CoreResult<()> {
    if curve.is_empty() {
        return Err(LaunchCurveError::invariant("empty curve"));
    }
    if curve.len() > MAX_CURVE_POINT {
        return Err(LaunchCurveError::invariant("too many curve points"));
    }
    if sqrt_start_price < MIN_SQRT_PRICE || sqrt_start_price >= MAX_SQRT_PRICE {
        return Err(LaunchCurveError::invariant("start price out of bounds"));
    }

    let mut previous = sqrt_start_price;
    for point in curve {
        if point.sqrt_price <= previous {
            return Err(LaunchCurveError::invariant(
                "curve thresholds not strictly increasing",
            ));
        }
        if point.sqrt_price > MAX_SQRT_PRICE {
            return Err(LaunchCurveError::invariant("curve threshold out of bounds"));
        }
        if point.liquidity == 0 {
            return Err(LaunchCurveError::invariant("curve segment without liquidity"));
        }
        previous = point.sqrt_price;
    }
    Ok(())
}
