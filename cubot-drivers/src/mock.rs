//! In-memory device for driver tests

use std::collections::{HashMap, VecDeque};
use std::string::String;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use crate::sysfs::{AttributeIo, IoError};

/// Attribute table with a write log and scripted reads
#[derive(Default)]
pub(crate) struct MockDevice {
    values: HashMap<String, String>,
    /// Values returned by successive reads, ahead of `values`
    scripted: HashMap<String, VecDeque<String>>,
    pub(crate) writes: Vec<(String, String)>,
    pub(crate) reads: usize,
    reject: Option<String>,
    reject_once: Option<String>,
}

impl MockDevice {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.into(), value.into());
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Queue values for successive reads of `name`
    pub(crate) fn script(&mut self, name: &str, values: &[&str]) {
        self.scripted
            .entry(name.into())
            .or_default()
            .extend(values.iter().map(|v| String::from(*v)));
    }

    /// Writes to `name` fail with `InvalidValue`
    pub(crate) fn reject_writes_to(&mut self, name: &str) {
        self.reject = Some(name.into());
    }

    /// The next write to `name` fails with `InvalidValue`
    pub(crate) fn reject_next_write_to(&mut self, name: &str) {
        self.reject_once = Some(name.into());
    }

    pub(crate) fn writes_to(&self, name: &str) -> Vec<&str> {
        self.writes
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

impl AttributeIo for MockDevice {
    fn read(&mut self, name: &str, buf: &mut [u8]) -> Result<usize, IoError> {
        self.reads += 1;
        let scripted = self.scripted.get_mut(name).and_then(VecDeque::pop_front);
        let value = match scripted {
            Some(v) => v,
            None => self.values.get(name).cloned().ok_or(IoError::NotFound)?,
        };
        let bytes = value.as_bytes();
        let n = bytes.len().min(buf.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(n)
    }

    fn write(&mut self, name: &str, value: &str) -> Result<(), IoError> {
        if self.reject.as_deref() == Some(name) {
            return Err(IoError::InvalidValue);
        }
        if self.reject_once.as_deref() == Some(name) {
            self.reject_once = None;
            return Err(IoError::InvalidValue);
        }
        self.writes.push((name.into(), value.into()));
        self.values.insert(name.into(), value.into());
        Ok(())
    }
}

/// Delay that returns immediately and counts calls
#[derive(Default)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
    }
}
