//! Motor driver implementations
//!
//! All three rig actuators are ev3dev tacho motors.

pub mod tacho;

pub use tacho::{MotorFlags, Polarity, StopAction, TachoConfig, TachoMotor};
