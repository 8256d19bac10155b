//! Controller state machine
//!
//! Tracks what the controller is doing and which commands it accepts.
//! The state machine is explicit, finite, and deterministic.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ErrorKind, State};
