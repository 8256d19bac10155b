//! Rig homing
//!
//! Drives every actuator to a known reference before any cube motion.

pub mod sequence;

pub use sequence::{home_rig, HomingError};
