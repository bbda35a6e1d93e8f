//! # Quote Types
//!
//! Disposable values produced by the quote engine.

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// How input that the curve cannot absorb is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub enum SwapMode {
    /// The whole input must be absorbed, otherwise the quote fails
    #[default]
    ExactIn,
    /// Buys stop at the migration price and report the unspent input
    PartialFill,
}

/// Trading fee split by recipient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct FeeBreakdown {
    /// Partner and creator share
    pub trading: u64,
    pub protocol: u64,
    pub referral: u64,
}

impl FeeBreakdown {
    /// Nominal fee taken from the trade
    pub fn total(&self) -> u64 {
        self.trading
            .saturating_add(self.protocol)
            .saturating_add(self.referral)
    }
}

/// Priced, fee-split quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct QuoteResult {
    /// Input consumed, fee included
    pub amount_in: u64,
    /// Output delivered to the trader, fee excluded
    pub amount_out: u64,
    /// Slippage-protected floor for `amount_out`
    pub minimum_amount_out: u64,
    pub fee: FeeBreakdown,
    /// Whether the fee is taken from the input token
    pub fee_on_input: bool,
    /// Total fee numerator applied (over the fee denominator)
    pub fee_numerator: u64,
    pub next_sqrt_price: u128,
    pub segments_crossed: u32,
    /// Input returned unspent (partial fill only)
    pub amount_left: u64,
    /// Whether the trade fills the migration threshold
    pub curve_complete: bool,
}

/// Amount of quote needed to complete the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct MigrationQuote {
    /// Quote to send, fee included
    pub amount_in: u64,
    /// Quote that reaches the curve
    pub amount_in_excluded_fee: u64,
    /// Base delivered, fee excluded
    pub amount_out: u64,
    pub fee: FeeBreakdown,
    pub fee_numerator: u64,
}
