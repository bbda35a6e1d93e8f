//! # Launchcurve Core - Bonding Curve Quote Engine
//!
//! Off-chain mirror of the on-chain bonding-curve math. Given a pool config
//! and a virtual pool snapshot it produces the same swap outcome the program
//! would, bit for bit:
//!
//! - Checked integer kernel with 256-bit intermediates
//! - Fee scheduler, rate limiter and dynamic fee
//! - Piecewise constant-liquidity curve walker
//! - Swap quote engine with slippage protection
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization of state and result types

pub mod constants;
pub mod curve;
pub mod errors;
pub mod fee;
pub mod math;
pub mod quote;
pub mod types;

// Re-export commonly used items
pub use constants::*;
pub use errors::{CoreResult, LaunchCurveError};
pub use quote::{quote, quote_to_migration, quote_with_mode};
pub use types::*;
