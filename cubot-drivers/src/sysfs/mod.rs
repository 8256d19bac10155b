//! Device attribute access
//!
//! ev3dev exposes each device as a directory of small text files. The
//! drivers only need to read and write those by name, so the transport is
//! a trait. With the `std` feature [`SysfsDevice`] implements it over the
//! real files; tests implement it over a table in memory.

pub mod attribute;
#[cfg(any(test, feature = "std"))]
pub mod file;

pub use attribute::{read_int, read_value, write_int, AttributeIo, IoError, MAX_VALUE_LEN};
#[cfg(any(test, feature = "std"))]
pub use file::SysfsDevice;
