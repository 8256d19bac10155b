//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod announcer;
pub mod sensor;

pub use actuator::{Actuator, ActuatorFault};
pub use announcer::Announcer;
pub use sensor::{ColorSensor, ProximitySensor, RawHueClass, SensorFault};
