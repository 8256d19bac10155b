//! Events that trigger state transitions

use super::machine::ErrorKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Homing events
    /// Homing sequence started
    StartHoming,
    /// Homing sequence finished successfully
    HomingComplete,

    // Scan events
    /// Full-cube scan started
    StartScan,
    /// Scan finished with all 54 facelets read
    ScanComplete,

    // Move events
    /// Face move or algorithm execution started
    StartMove,
    /// Execution finished
    MoveComplete,

    /// Cube reported solved
    Solved,

    /// Fault detected
    ErrorDetected(ErrorKind),
}
