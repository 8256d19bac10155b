//! Attribute I/O trait and typed helpers

use core::fmt::Write;

use heapless::String;

/// Longest attribute value the drivers read
pub const MAX_VALUE_LEN: usize = 64;

/// Attribute access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Device or attribute does not exist
    NotFound,
    /// Read or write failed
    Io,
    /// Device rejected the value, or returned one that does not parse
    InvalidValue,
}

/// Named attribute access for one device
pub trait AttributeIo {
    /// Read attribute `name` into `buf`, returning the number of bytes read
    fn read(&mut self, name: &str, buf: &mut [u8]) -> Result<usize, IoError>;

    /// Write `value` to attribute `name`
    fn write(&mut self, name: &str, value: &str) -> Result<(), IoError>;
}

/// Read an attribute as trimmed text
pub fn read_value<IO: AttributeIo>(
    io: &mut IO,
    name: &str,
) -> Result<String<MAX_VALUE_LEN>, IoError> {
    let mut buf = [0u8; MAX_VALUE_LEN];
    let n = io.read(name, &mut buf)?;
    let text = buf
        .get(..n)
        .and_then(|bytes| core::str::from_utf8(bytes).ok())
        .ok_or(IoError::InvalidValue)?;
    String::try_from(text.trim()).map_err(|_| IoError::InvalidValue)
}

/// Read an attribute as a decimal integer
pub fn read_int<IO: AttributeIo>(io: &mut IO, name: &str) -> Result<i32, IoError> {
    read_value(io, name)?
        .parse()
        .map_err(|_| IoError::InvalidValue)
}

/// Write a decimal integer to an attribute
pub fn write_int<IO: AttributeIo>(io: &mut IO, name: &str, value: i32) -> Result<(), IoError> {
    let mut text: String<12> = String::new();
    write!(text, "{}", value).map_err(|_| IoError::InvalidValue)?;
    io.write(name, &text)
}
