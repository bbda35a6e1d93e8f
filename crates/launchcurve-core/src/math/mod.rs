//! # Mathematical Functions
//!
//! Checked integer kernel, Q64 fixed point and curve relations shared by the
//! fee and quote layers.

pub mod curve_math;
pub mod fixed_point;
pub mod safe_math;
pub mod u256_math;

// Re-export commonly used functions
pub use curve_math::*;
pub use fixed_point::*;
pub use safe_math::*;
pub use u256_math::*;

pub use ethnum::U256;
