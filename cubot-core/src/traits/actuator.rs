//! Actuator trait
//!
//! One motorized joint of the rig: the sensor arm, the flipper or the
//! turntable. Positions, speeds and durations are in the actuator's own
//! units (tacho counts, counts per second, milliseconds). Nothing at this
//! layer knows about the cube.

/// Errors reported by an actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorFault {
    /// Device missing or not responding
    Unreachable,
    /// Motor stalled before reaching its target
    Stalled,
    /// Motor drew too much current
    Overloaded,
    /// Motion did not finish within the allowed time
    Timeout,
    /// Device refused the command or its parameters
    Rejected,
}

/// Trait for a position-controlled motor
///
/// Command methods only start a motion and return immediately. Use
/// [`Actuator::wait_until_idle`] (or [`Actuator::run_relative`]) to wait for
/// it to finish.
#[allow(async_fn_in_trait)]
pub trait Actuator {
    /// Start a move of `delta` counts relative to the current position
    fn move_relative(&mut self, delta: i32, speed: i32) -> Result<(), ActuatorFault>;

    /// Run at `speed` for `duration_ms`, typically against a hard stop
    fn run_timed(&mut self, speed: i32, duration_ms: u32) -> Result<(), ActuatorFault>;

    /// Run at `speed` until [`Actuator::stop`] is called
    fn run_until_stopped(&mut self, speed: i32) -> Result<(), ActuatorFault>;

    /// Stop any motion
    fn stop(&mut self) -> Result<(), ActuatorFault>;

    /// Wait for the current motion to complete
    async fn wait_until_idle(&mut self) -> Result<(), ActuatorFault>;

    /// Move by `delta` counts and wait for the move to finish
    async fn run_relative(&mut self, delta: i32, speed: i32) -> Result<(), ActuatorFault> {
        self.move_relative(delta, speed)?;
        self.wait_until_idle().await
    }

    /// Run for `duration_ms` and wait for the run to finish
    async fn run_timed_to_end(&mut self, speed: i32, duration_ms: u32) -> Result<(), ActuatorFault> {
        self.run_timed(speed, duration_ms)?;
        self.wait_until_idle().await
    }
}
