//! EV3 infrared sensor in proximity mode

use cubot_core::traits::{ProximitySensor, SensorFault};

use super::{fault, read_value0};
use crate::sysfs::AttributeIo;

const MODE_PROXIMITY: &str = "IR-PROX";

/// Infrared sensor used as the turntable reference
pub struct InfraredSensor<IO> {
    io: IO,
}

impl<IO: AttributeIo> InfraredSensor<IO> {
    pub fn new(io: IO) -> Self {
        Self { io }
    }

    /// Put the sensor in proximity mode
    pub fn init(&mut self) -> Result<(), SensorFault> {
        self.io.write("mode", MODE_PROXIMITY).map_err(fault)
    }

    pub fn release(self) -> IO {
        self.io
    }
}

impl<IO: AttributeIo> ProximitySensor for InfraredSensor<IO> {
    fn read_proximity(&mut self) -> Result<u8, SensorFault> {
        read_value0(&mut self.io, 100)
    }
}
