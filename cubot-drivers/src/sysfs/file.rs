//! Attribute access through sysfs files

use std::fs;
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};

use super::{read_value, AttributeIo, IoError};

/// Root of the ev3dev tacho motor class
pub const TACHO_MOTOR_CLASS: &str = "/sys/class/tacho-motor";
/// Root of the ev3dev sensor class
pub const LEGO_SENSOR_CLASS: &str = "/sys/class/lego-sensor";

/// One device directory, such as `/sys/class/tacho-motor/motor0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsDevice {
    path: PathBuf,
}

impl SysfsDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Find the device in `class` whose `address` attribute is `port`
    ///
    /// Device numbering changes with plug order, ports do not.
    ///
    /// ```ignore
    /// let arm = SysfsDevice::find(TACHO_MOTOR_CLASS, "ev3-ports:outA")?;
    /// ```
    pub fn find(class: impl AsRef<Path>, port: &str) -> Result<Self, IoError> {
        let entries = fs::read_dir(class).map_err(io_error)?;
        for entry in entries {
            let mut device = Self::new(entry.map_err(io_error)?.path());
            match read_value(&mut device, "address") {
                Ok(address) if address.as_str() == port => return Ok(device),
                Ok(_) | Err(IoError::NotFound) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(IoError::NotFound)
    }
}

impl AttributeIo for SysfsDevice {
    fn read(&mut self, name: &str, buf: &mut [u8]) -> Result<usize, IoError> {
        let mut file = fs::File::open(self.path.join(name)).map_err(io_error)?;
        let mut n = 0;
        while n < buf.len() {
            match file.read(&mut buf[n..]) {
                Ok(0) => break,
                Ok(read) => n += read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(io_error(e)),
            }
        }
        Ok(n)
    }

    fn write(&mut self, name: &str, value: &str) -> Result<(), IoError> {
        fs::write(self.path.join(name), value).map_err(io_error)
    }
}

fn io_error(e: io::Error) -> IoError {
    match e.kind() {
        ErrorKind::NotFound => IoError::NotFound,
        // the kernel answers EINVAL to a value it does not accept
        ErrorKind::InvalidInput => IoError::InvalidValue,
        _ => IoError::Io,
    }
}
