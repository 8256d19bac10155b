//! Color classifier
//!
//! Maps a raw hue class and reflected intensity to one of the six sticker
//! colors. The sensor reports red and orange as the same hue; orange
//! stickers reflect more light, so a single intensity threshold splits them.

use crate::config::ClassifierConfig;
use crate::cube::FaceletColor;
use crate::traits::{ColorSensor, RawHueClass, SensorFault};

/// Classification error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClassifyError {
    /// Hue does not correspond to any sticker color, usually an empty cradle
    UnrecognizedFacelet(RawHueClass),
}

/// Error from reading and classifying in one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError {
    Sensor(SensorFault),
    Classify(ClassifyError),
}

impl From<SensorFault> for ReadError {
    fn from(e: SensorFault) -> Self {
        ReadError::Sensor(e)
    }
}

impl From<ClassifyError> for ReadError {
    fn from(e: ClassifyError) -> Self {
        ReadError::Classify(e)
    }
}

/// Raw reading to sticker color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorClassifier {
    red_orange_threshold: u8,
}

impl ColorClassifier {
    pub const fn new(red_orange_threshold: u8) -> Self {
        Self {
            red_orange_threshold,
        }
    }

    pub const fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.red_orange_threshold)
    }

    pub const fn threshold(&self) -> u8 {
        self.red_orange_threshold
    }

    /// Classify a reading
    ///
    /// `intensity` only matters for [`RawHueClass::Red`].
    pub fn classify(&self, hue: RawHueClass, intensity: u8) -> Result<FaceletColor, ClassifyError> {
        match hue {
            RawHueClass::Blue => Ok(FaceletColor::Blue),
            RawHueClass::Green => Ok(FaceletColor::Green),
            RawHueClass::Yellow => Ok(FaceletColor::Yellow),
            RawHueClass::White => Ok(FaceletColor::White),
            RawHueClass::Red if intensity < self.red_orange_threshold => Ok(FaceletColor::Red),
            RawHueClass::Red => Ok(FaceletColor::Orange),
            other => Err(ClassifyError::UnrecognizedFacelet(other)),
        }
    }

    /// Read the sensor and classify
    ///
    /// Reflected intensity is only read for a red hue, so a failed hue
    /// classification costs exactly one sensor read.
    pub fn read<S: ColorSensor>(&self, sensor: &mut S) -> Result<FaceletColor, ReadError> {
        let hue = sensor.read_color_class()?;
        let intensity = match hue {
            RawHueClass::Red => sensor.read_reflected_intensity()?,
            _ => 0,
        };
        Ok(self.classify(hue, intensity)?)
    }
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}
