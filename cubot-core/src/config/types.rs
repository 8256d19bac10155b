//! Configuration type definitions
//!
//! All positions are in actuator counts, speeds in counts per second and
//! durations in milliseconds. Sensor-arm offsets are absolute positions
//! measured from the arm's park position.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A speed is zero or negative where a magnitude is expected
    InvalidSpeed,
    /// Scan offsets are not ordered park < corner < edge < center
    InvalidArmOffsets,
    /// Flipper travels are zero or the hold travel exceeds the reorient travel
    InvalidFlipperTravel,
    /// Turntable travel cannot be split into two equal eighths
    InvalidTurntableTravel,
    /// Homing timeout or poll interval is zero
    InvalidHoming,
    /// TOML input could not be parsed
    Parse,
}

/// Sensor arm configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArmConfig {
    /// Speed for scan moves
    pub speed: i32,
    /// Speed of the timed run against the hard stop
    pub homing_speed: i32,
    /// Duration of the timed run against the hard stop
    pub homing_time_ms: u32,
    /// Relative move from the hard stop to the park position
    pub park_offset: i32,
    /// Offset placing the sensor over a center facelet
    pub center_offset: i32,
    /// Offset placing the sensor over an edge facelet
    pub edge_offset: i32,
    /// Offset placing the sensor over a corner facelet
    pub corner_offset: i32,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            speed: 500,
            homing_speed: 500,
            homing_time_ms: 2500,
            park_offset: -215,
            center_offset: 460,
            edge_offset: 360,
            corner_offset: 330,
        }
    }
}

/// Flipper (cradle) configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlipperConfig {
    pub speed: i32,
    /// Speed of the timed run against the rest stop (signed)
    pub homing_speed: i32,
    pub homing_time_ms: u32,
    /// Small relative move off the rest stop after the timed run
    pub rest_offset: i32,
    /// Travel out and back for one reorientation
    pub reorient_travel: i32,
    /// Travel from rest to clamping the upper two layers
    pub hold_travel: i32,
}

impl Default for FlipperConfig {
    fn default() -> Self {
        Self {
            speed: 150,
            homing_speed: -150,
            homing_time_ms: 2500,
            rest_offset: 5,
            reorient_travel: 190,
            hold_travel: 90,
        }
    }
}

/// Turntable configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TurntableConfig {
    pub speed: i32,
    /// Free-run speed while searching for the reference mark
    pub homing_speed: i32,
    /// Travel for a quarter turn, including overshoot
    pub quarter_travel: i32,
    /// Backlash correction applied after each quarter turn
    pub overshoot: i32,
}

impl TurntableConfig {
    /// Net travel of one quarter turn
    pub const fn net_quarter(&self) -> i32 {
        self.quarter_travel - self.overshoot
    }
}

impl Default for TurntableConfig {
    fn default() -> Self {
        Self {
            speed: 250,
            homing_speed: 250,
            quarter_travel: 290,
            overshoot: 20,
        }
    }
}

/// Homing sequence configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HomingConfig {
    /// Turntable stops once the proximity reading exceeds this value
    pub proximity_threshold: u8,
    /// Give up on the turntable search after this long
    pub timeout_ms: u32,
    /// Interval between proximity reads
    pub poll_interval_ms: u32,
}

impl Default for HomingConfig {
    fn default() -> Self {
        Self {
            proximity_threshold: 35,
            timeout_ms: 10_000,
            poll_interval_ms: 10,
        }
    }
}

/// Color classifier configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Reflected intensity at or above which a red hue reads as orange
    pub red_orange_threshold: u8,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            red_orange_threshold: 63,
        }
    }
}

/// Complete rig configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RigConfig {
    pub arm: ArmConfig,
    pub flipper: FlipperConfig,
    pub turntable: TurntableConfig,
    pub homing: HomingConfig,
    pub classifier: ClassifierConfig,
}

impl RigConfig {
    /// Create a configuration with calibrated defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the configuration describes a usable rig
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speeds = [
            self.arm.speed,
            self.arm.homing_speed,
            self.flipper.speed,
            self.turntable.speed,
            self.turntable.homing_speed,
        ];
        if speeds.iter().any(|&s| s <= 0) || self.flipper.homing_speed == 0 {
            return Err(ConfigError::InvalidSpeed);
        }

        let arm = &self.arm;
        if !(0 < arm.corner_offset
            && arm.corner_offset < arm.edge_offset
            && arm.edge_offset < arm.center_offset)
        {
            return Err(ConfigError::InvalidArmOffsets);
        }

        let flipper = &self.flipper;
        if flipper.reorient_travel <= 0
            || flipper.hold_travel <= 0
            || flipper.hold_travel >= flipper.reorient_travel
        {
            return Err(ConfigError::InvalidFlipperTravel);
        }

        let table = &self.turntable;
        if table.quarter_travel <= 0
            || table.overshoot < 0
            || table.net_quarter() <= 0
            || table.quarter_travel % 2 != 0
            || table.overshoot % 2 != 0
        {
            return Err(ConfigError::InvalidTurntableTravel);
        }

        if self.homing.timeout_ms == 0 || self.homing.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidHoming);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = RigConfig::new();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.turntable.net_quarter(), 270);
        assert_eq!(config.turntable.speed, 250);
        assert_eq!(config.classifier.red_orange_threshold, 63);
    }

    #[test]
    fn test_rejects_unordered_arm_offsets() {
        let mut config = RigConfig::new();
        config.arm.edge_offset = config.arm.center_offset;
        assert_eq!(config.validate(), Err(ConfigError::InvalidArmOffsets));
    }

    #[test]
    fn test_rejects_zero_speed() {
        let mut config = RigConfig::new();
        config.turntable.speed = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed));
    }

    #[test]
    fn test_rejects_hold_beyond_reorient() {
        let mut config = RigConfig::new();
        config.flipper.hold_travel = 200;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFlipperTravel));
    }

    #[test]
    fn test_rejects_odd_turntable_travel() {
        let mut config = RigConfig::new();
        config.turntable.quarter_travel = 291;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTurntableTravel));
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let mut config = RigConfig::new();
        config.homing.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidHoming));
    }
}
