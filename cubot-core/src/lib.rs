//! Board-agnostic core logic for the Cubot cube manipulator
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (actuator, color sensor, proximity sensor)
//! - Cube model (faces, facelet colors, moves, 54-facelet state)
//! - Color classification of raw sensor readings
//! - Kinematic primitives and orientation tracking
//! - Move compiler and plan optimizer
//! - Full-cube scan controller
//! - Homing sequence
//! - Controller state machine and facade
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(feature = "toml")]
extern crate alloc;

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod color;
pub mod config;
pub mod controller;
pub mod cube;
pub mod homing;
pub mod kinematics;
pub mod motion;
pub mod scan;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod sim;

pub use controller::{Cubot, CubotError};
pub use cube::{Amount, CubeState, Face, FaceMove, FaceletColor};
