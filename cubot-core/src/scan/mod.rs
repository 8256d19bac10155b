//! Full-cube scanning

pub mod controller;

pub use controller::{ScanError, Scanner};
