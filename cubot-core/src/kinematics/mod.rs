//! Rig kinematics
//!
//! The three-axis rig, its four motion primitives and the bookkeeping
//! that tracks which logical face sits where on the physical rig.

pub mod orientation;
pub mod primitive;
pub mod rig;

pub use orientation::Orientation;
pub use primitive::{LockState, Motor, Primitive};
pub use rig::{Interlock, Rig, RigError};
