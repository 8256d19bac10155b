//! Sensor traits
//!
//! The color sensor reports a coarse hue class plus a reflected light
//! intensity. The proximity sensor is only used while homing the turntable.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors that can occur while reading a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorFault {
    /// Device missing or not responding
    Unreachable,
    /// Value outside the range the device documents
    InvalidReading,
}

/// Hue class reported by the color sensor
///
/// Discriminants match the raw values the sensor reports. The sensor
/// cannot tell red from orange; both read as [`RawHueClass::Red`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum RawHueClass {
    NoColor = 0,
    Black = 1,
    Blue = 2,
    Green = 3,
    Yellow = 4,
    Red = 5,
    White = 6,
    Brown = 7,
}

impl RawHueClass {
    /// Decode a raw sensor value
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NoColor),
            1 => Some(Self::Black),
            2 => Some(Self::Blue),
            3 => Some(Self::Green),
            4 => Some(Self::Yellow),
            5 => Some(Self::Red),
            6 => Some(Self::White),
            7 => Some(Self::Brown),
            _ => None,
        }
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Trait for the facelet color sensor
pub trait ColorSensor {
    /// Read the hue class of the surface under the sensor
    fn read_color_class(&mut self) -> Result<RawHueClass, SensorFault>;

    /// Read reflected light intensity in percent (0-100)
    fn read_reflected_intensity(&mut self) -> Result<u8, SensorFault>;
}

/// Trait for the turntable reference sensor
pub trait ProximitySensor {
    /// Read proximity in percent (0 = touching, 100 = nothing in range)
    fn read_proximity(&mut self) -> Result<u8, SensorFault>;
}
