//! # Core Type Definitions
//!
//! Account snapshots and engine outputs.

pub mod config;
pub mod pool;
pub mod quote;

// Re-export all types
pub use config::*;
pub use pool::*;
pub use quote::*;
