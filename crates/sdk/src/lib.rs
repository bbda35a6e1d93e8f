//! # Launchcurve SDK
//!
//! Client-side quoting for launchcurve bonding-curve pools:
//! - Account snapshots and the [`AccountSource`] fetch seam
//! - [`Quoter`] facade applying configured slippage, referral and swap mode
//! - Pool progress and fee metrics

pub mod config;
pub mod errors;
pub mod metrics;
pub mod quoter;
pub mod source;

pub use config::QuoterConfig;
pub use errors::{SdkError, SdkResult};
pub use metrics::{pool_metrics, PoolMetricsReport, TradingFeeShares};
pub use quoter::{QuoteReport, QuoteRequest, Quoter};
pub use source::{AccountSource, InMemoryAccountSource, PoolConfigAccount, VirtualPoolAccount};

// Re-export shared types from launchcurve-core
pub use launchcurve_core::constants::*;
pub use launchcurve_core::errors::*;
pub use launchcurve_core::types::*;
