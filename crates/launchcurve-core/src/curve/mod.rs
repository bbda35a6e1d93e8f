//! # Curve
//!
//! Piecewise constant-liquidity price curve: the segment walker used by the
//! quote engine and the sizing helpers used to design a curve.

pub mod builder;
pub mod walker;

pub use builder::*;
pub use walker::{advance, walk_curve, WalkResult};
