//! State machine definition
//!
//! Hardware motion is only commanded in `Homing`, `Scanning` and
//! `Executing`. Any failure lands in `Error`, which can only be left by
//! homing again.

use super::events::Event;

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on; rig position unknown
    #[default]
    Boot,
    /// Homing sequence running
    Homing,
    /// Homed and idle, accepting scan and move commands
    Ready,
    /// Full-cube scan running
    Scanning,
    /// Face moves executing
    Executing,
    /// Cube reported solved
    Solved,
    /// Fault detected; rig must be homed again
    Error(ErrorKind),
}

/// Types of errors that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Actuator stalled, overloaded, timed out or unreachable
    ActuatorFault,
    /// Sensor could not be read
    SensorFault,
    /// Color sensor found no cube in the cradle
    NoCube,
    /// Turntable reference not found while homing
    HomingIncomplete,
    /// Motion refused by a rig interlock
    Interlock,
    /// Scan traversal did not cover every facelet
    ScanIncomplete,
    /// Operator requested an emergency stop
    EmergencyStop,
}

impl State {
    /// Check if this state accepts scan and move commands
    pub fn accepts_commands(&self) -> bool {
        matches!(self, State::Ready)
    }

    /// Check if homing may be started from this state
    pub fn can_home(&self) -> bool {
        matches!(
            self,
            State::Boot | State::Ready | State::Solved | State::Error(_)
        )
    }

    /// Check if the rig is moving
    pub fn is_busy(&self) -> bool {
        matches!(self, State::Homing | State::Scanning | State::Executing)
    }

    /// Check if this is an error state
    pub fn is_error(&self) -> bool {
        matches!(self, State::Error(_))
    }

    /// Process an event and return the next state
    ///
    /// Events that make no sense in the current state leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Boot | Ready | State::Solved | Error(_), StartHoming) => Homing,
            (Homing, HomingComplete) => Ready,

            (Ready, StartScan) => Scanning,
            (Scanning, ScanComplete) => Ready,

            (Ready, StartMove) => Executing,
            (Executing, MoveComplete) => Ready,

            (Ready, Event::Solved) => State::Solved,

            // Errors are accepted from anywhere
            (_, ErrorDetected(kind)) => Error(kind),

            (state, _) => state,
        }
    }
}
