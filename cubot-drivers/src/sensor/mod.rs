//! Sensor driver implementations

pub mod color;
pub mod infrared;

pub use color::{ColorMode, ColorSensorDriver};
pub use infrared::InfraredSensor;

use cubot_core::traits::SensorFault;

use crate::sysfs::{read_int, AttributeIo, IoError};

/// Attribute holding the first reading of the active mode
const VALUE0: &str = "value0";

fn fault(e: IoError) -> SensorFault {
    match e {
        IoError::NotFound | IoError::Io => SensorFault::Unreachable,
        IoError::InvalidValue => SensorFault::InvalidReading,
    }
}

/// Read `value0` and check it lies in `0..=max`
fn read_value0<IO: AttributeIo>(io: &mut IO, max: u8) -> Result<u8, SensorFault> {
    let value = read_int(io, VALUE0).map_err(fault)?;
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or(SensorFault::InvalidReading)
}
