//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cubot-core for the ev3dev device model, where every motor and
//! sensor is a directory of text attributes:
//!
//! - Attribute access abstraction, with a sysfs file backend (`std`)
//! - Tacho motors (sensor arm, flipper, turntable)
//! - Color sensor (hue class, reflected intensity)
//! - Infrared sensor (turntable reference)

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod motor;
pub mod sensor;
pub mod sysfs;

#[cfg(test)]
pub(crate) mod mock;
