//! improb math utilities.

pub mod math;

pub use math::matrix::Matrix;
pub use math::stable::*;
