//! Rig configuration
//!
//! Calibrated offsets, speeds and thresholds for the three actuators, the
//! homing sequence and the color classifier. Defaults match a stock rig.

pub mod types;

#[cfg(feature = "toml")]
pub mod toml;

pub use types::*;
