//! Facelet color classification

pub mod classifier;

pub use classifier::{ClassifyError, ColorClassifier, ReadError};
