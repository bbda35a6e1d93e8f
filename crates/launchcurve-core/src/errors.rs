//! # Core Error Types
//!
//! Errors raised by the quote engine. None of them are transient: the engine
//! performs no I/O, so callers either fix their inputs or re-fetch state.

use thiserror::Error;

/// Core engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub enum LaunchCurveError {
    // ========================================================================
    // Math Errors
    // ========================================================================
    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Type cast failed")]
    TypeCastFailed,

    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid slippage: {0} bps (max 10000)")]
    InvalidSlippage(u64),

    #[error("Configuration invariant violated: {0}")]
    ConfigurationInvariantViolated(&'static str),

    #[error("Inconsistent pool state: {0}")]
    InconsistentPoolState(&'static str),

    // ========================================================================
    // Trading Errors
    // ========================================================================
    #[error("Curve exhausted: not enough liquidity on the configured curve")]
    CurveExhausted,

    #[error("Pool curve is complete")]
    PoolCompleted,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, LaunchCurveError>;

impl LaunchCurveError {
    /// Create a configuration invariant error with reason
    pub fn invariant(reason: &'static str) -> Self {
        Self::ConfigurationInvariantViolated(reason)
    }

    /// True for errors caused by the arithmetic kernel rather than the inputs
    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            Self::MathOverflow | Self::MathUnderflow | Self::DivisionByZero | Self::TypeCastFailed
        )
    }
}
