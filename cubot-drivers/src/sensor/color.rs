//! EV3 color sensor
//!
//! The sensor has one active mode at a time. Switching mode costs a write
//! and a short settle, so the last mode written is cached and only changed
//! when a read needs a different one.

use cubot_core::traits::{ColorSensor, RawHueClass, SensorFault};

use super::{fault, read_value0};
use crate::sysfs::AttributeIo;

/// Sensor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColorMode {
    /// Hue class, `value0` in 0..=7
    Color,
    /// Reflected light intensity, `value0` in 0..=100
    Reflect,
}

impl ColorMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ColorMode::Color => "COL-COLOR",
            ColorMode::Reflect => "COL-REFLECT",
        }
    }
}

/// Color sensor on an ev3dev input port
pub struct ColorSensorDriver<IO> {
    io: IO,
    mode: Option<ColorMode>,
}

impl<IO: AttributeIo> ColorSensorDriver<IO> {
    pub fn new(io: IO) -> Self {
        Self { io, mode: None }
    }

    /// Mode last written to the device
    pub fn mode(&self) -> Option<ColorMode> {
        self.mode
    }

    pub fn release(self) -> IO {
        self.io
    }

    fn enter(&mut self, mode: ColorMode) -> Result<(), SensorFault> {
        if self.mode == Some(mode) {
            return Ok(());
        }
        // unknown until the write succeeds
        self.mode = None;
        self.io.write("mode", mode.as_str()).map_err(fault)?;
        self.mode = Some(mode);
        Ok(())
    }
}

impl<IO: AttributeIo> ColorSensor for ColorSensorDriver<IO> {
    fn read_color_class(&mut self) -> Result<RawHueClass, SensorFault> {
        self.enter(ColorMode::Color)?;
        let raw = read_value0(&mut self.io, 7)?;
        RawHueClass::from_raw(raw).ok_or(SensorFault::InvalidReading)
    }

    fn read_reflected_intensity(&mut self) -> Result<u8, SensorFault> {
        self.enter(ColorMode::Reflect)?;
        read_value0(&mut self.io, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDevice;

    #[test]
    fn test_read_color_class() {
        let mut dev = MockDevice::new();
        dev.set("value0", "5\n");
        let mut sensor = ColorSensorDriver::new(dev);
        assert_eq!(sensor.read_color_class(), Ok(RawHueClass::Red));
        assert_eq!(sensor.mode(), Some(ColorMode::Color));
        let dev = sensor.release();
        assert_eq!(dev.get("mode"), Some("COL-COLOR"));
    }

    #[test]
    fn test_mode_written_only_on_change() {
        let mut dev = MockDevice::new();
        dev.script("value0", &["6", "3", "42", "2"]);
        let mut sensor = ColorSensorDriver::new(dev);
        assert_eq!(sensor.read_color_class(), Ok(RawHueClass::White));
        assert_eq!(sensor.read_color_class(), Ok(RawHueClass::Green));
        assert_eq!(sensor.read_reflected_intensity(), Ok(42));
        assert_eq!(sensor.read_color_class(), Ok(RawHueClass::Blue));
        let dev = sensor.release();
        assert_eq!(dev.writes_to("mode"), vec!["COL-COLOR", "COL-REFLECT", "COL-COLOR"]);
    }

    #[test]
    fn test_out_of_range_readings() {
        let mut dev = MockDevice::new();
        dev.script("value0", &["8", "101", "-1"]);
        let mut sensor = ColorSensorDriver::new(dev);
        assert_eq!(sensor.read_color_class(), Err(SensorFault::InvalidReading));
        assert_eq!(sensor.read_reflected_intensity(), Err(SensorFault::InvalidReading));
        assert_eq!(sensor.read_reflected_intensity(), Err(SensorFault::InvalidReading));
    }

    #[test]
    fn test_failed_mode_write_is_retried() {
        let mut dev = MockDevice::new();
        dev.set("value0", "4\n");
        dev.reject_next_write_to("mode");
        let mut sensor = ColorSensorDriver::new(dev);
        assert_eq!(sensor.read_color_class(), Err(SensorFault::InvalidReading));
        assert_eq!(sensor.mode(), None);

        assert_eq!(sensor.read_color_class(), Ok(RawHueClass::Yellow));
        assert_eq!(sensor.mode(), Some(ColorMode::Color));
        let dev = sensor.release();
        assert_eq!(dev.writes_to("mode"), vec!["COL-COLOR"]);
    }

    #[test]
    fn test_missing_sensor() {
        let mut sensor = ColorSensorDriver::new(MockDevice::new());
        assert_eq!(sensor.read_reflected_intensity(), Err(SensorFault::Unreachable));
    }
}
