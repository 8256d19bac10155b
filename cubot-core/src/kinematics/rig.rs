//! Three-axis rig
//!
//! Owns the three actuators and the rig's tracked state. Every primitive
//! checks its interlocks before commanding any motion and updates the
//! tracked [`Orientation`] and [`LockState`] only after the motion
//! succeeded.
//!
//! Any actuator fault leaves the physical state unknown, so the rig drops
//! back to "not homed" and refuses further motion until homed again.

use crate::config::{ConfigError, RigConfig};
use crate::cube::{Amount, Face};
use crate::traits::{Actuator, ActuatorFault};

use super::{LockState, Motor, Orientation, Primitive};

/// Turntable eighths per full revolution
const EIGHTHS_PER_REV: u8 = 8;

/// Interlock preventing a primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Interlock {
    /// Rig has not been homed, or a fault invalidated homing
    NotHomed,
    /// Upper layers are clamped
    Locked,
    /// Upper layers are not clamped
    Unlocked,
    /// Sensor arm is not parked
    ArmDeployed,
    /// Turntable is between quarter positions
    Misaligned,
    /// Sensor arm offset outside the park-to-center range
    OutOfRange,
}

/// Rig errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RigError {
    /// An actuator reported a fault
    Actuator(Motor, ActuatorFault),
    /// Primitive refused in the current state
    Interlock(Interlock),
}

impl From<Interlock> for RigError {
    fn from(i: Interlock) -> Self {
        RigError::Interlock(i)
    }
}

/// The rig: sensor arm, flipper and turntable
pub struct Rig<A> {
    arm: A,
    flipper: A,
    turntable: A,
    config: RigConfig,
    orientation: Orientation,
    lock: LockState,
    /// Turntable position in eighths since the last quarter-aligned homing
    eighths: u8,
    /// Sensor arm offset from park
    arm_offset: i32,
    homed: bool,
}

impl<A: Actuator> Rig<A> {
    /// Create a rig. It must be homed before any primitive is accepted.
    pub fn new(
        arm: A,
        flipper: A,
        turntable: A,
        config: RigConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            arm,
            flipper,
            turntable,
            config,
            orientation: Orientation::REFERENCE,
            lock: LockState::Unlocked,
            eighths: 0,
            arm_offset: 0,
            homed: false,
        })
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    pub fn arm_offset(&self) -> i32 {
        self.arm_offset
    }

    pub fn is_homed(&self) -> bool {
        self.homed
    }

    /// True when the turntable sits on a quarter position
    pub fn is_aligned(&self) -> bool {
        self.eighths % 2 == 0
    }

    /// Flip the whole cube (R to U, U to L, L to D, D to R)
    pub async fn reorient_cube(&mut self) -> Result<(), RigError> {
        self.require_ready_for_layers()?;
        if self.lock.is_locked() {
            return Err(Interlock::Locked.into());
        }

        let travel = self.config.flipper.reorient_travel;
        let speed = self.config.flipper.speed;
        self.drive(Motor::Flipper, travel, speed).await?;
        self.drive(Motor::Flipper, -travel, speed).await?;

        self.orientation.reorient();
        trace!("reoriented, up = {}", self.orientation.face_at(Face::Up));
        Ok(())
    }

    /// Turn the turntable by `amount`
    ///
    /// Turns the whole cube when unlocked and only the bottom layer when
    /// locked. Each quarter overshoots and backs off to take up backlash.
    pub async fn turn_layer(&mut self, amount: Amount) -> Result<(), RigError> {
        self.require_ready_for_layers()?;

        let quarters = amount.quarters() as i32;
        let table = self.config.turntable;
        self.drive(Motor::Turntable, table.quarter_travel * quarters, table.speed)
            .await?;
        self.drive(Motor::Turntable, -table.overshoot * quarters, table.speed)
            .await?;

        if !self.lock.is_locked() {
            self.orientation.spin(amount);
        }
        trace!("turned {} ({})", amount, self.lock);
        Ok(())
    }

    /// Clamp the upper two layers
    pub async fn hold_layers(&mut self) -> Result<(), RigError> {
        self.require_ready_for_layers()?;
        if self.lock.is_locked() {
            return Err(Interlock::Locked.into());
        }

        let flipper = self.config.flipper;
        self.drive(Motor::Flipper, flipper.hold_travel, flipper.speed)
            .await?;
        self.lock = LockState::Locked;
        Ok(())
    }

    /// Unclamp the upper two layers
    pub async fn release_layers(&mut self) -> Result<(), RigError> {
        self.require_homed()?;
        if !self.lock.is_locked() {
            return Err(Interlock::Unlocked.into());
        }

        let flipper = self.config.flipper;
        self.drive(Motor::Flipper, -flipper.hold_travel, flipper.speed)
            .await?;
        self.lock = LockState::Unlocked;
        Ok(())
    }

    /// Advance the turntable one eighth turn clockwise, for scanning
    ///
    /// The cube stays unlocked. Two consecutive eighths equal one clockwise
    /// quarter turn of the whole cube.
    pub async fn index_turntable(&mut self) -> Result<(), RigError> {
        self.require_homed()?;
        if self.lock.is_locked() {
            return Err(Interlock::Locked.into());
        }

        let table = self.config.turntable;
        self.drive(Motor::Turntable, table.quarter_travel / 2, table.speed)
            .await?;
        self.drive(Motor::Turntable, -table.overshoot / 2, table.speed)
            .await?;

        self.eighths = (self.eighths + 1) % EIGHTHS_PER_REV;
        if self.is_aligned() {
            self.orientation.spin(Amount::Clockwise);
        }
        Ok(())
    }

    /// Move the sensor arm to `offset` counts from park
    pub async fn move_arm(&mut self, offset: i32) -> Result<(), RigError> {
        self.require_homed()?;
        if !(0..=self.config.arm.center_offset).contains(&offset) {
            return Err(Interlock::OutOfRange.into());
        }

        let delta = offset - self.arm_offset;
        if delta != 0 {
            self.drive(Motor::Arm, delta, self.config.arm.speed).await?;
            self.arm_offset = offset;
        }
        Ok(())
    }

    /// Return the sensor arm to its park position
    pub async fn park_arm(&mut self) -> Result<(), RigError> {
        self.move_arm(0).await
    }

    /// Execute one primitive
    pub async fn perform(&mut self, primitive: Primitive) -> Result<(), RigError> {
        match primitive {
            Primitive::Reorient => self.reorient_cube().await,
            Primitive::Hold => self.hold_layers().await,
            Primitive::Release => self.release_layers().await,
            Primitive::Turn(amount) => self.turn_layer(amount).await,
        }
    }

    /// Execute a plan in order, stopping at the first error
    pub async fn execute(&mut self, plan: &[Primitive]) -> Result<(), RigError> {
        debug!("executing {} primitives", plan.len());
        for &primitive in plan {
            self.perform(primitive).await?;
        }
        Ok(())
    }

    /// Stop every actuator
    ///
    /// Best effort: every stop is attempted regardless of earlier failures.
    /// The rig must be homed again afterwards.
    pub fn emergency_stop(&mut self) {
        warn!("emergency stop");
        for motor in [Motor::Arm, Motor::Flipper, Motor::Turntable] {
            if let Err(e) = self.actuator(motor).stop() {
                warn!("stop {} failed: {}", motor, e);
            }
        }
        self.homed = false;
    }

    pub(crate) fn actuator(&mut self, motor: Motor) -> &mut A {
        match motor {
            Motor::Arm => &mut self.arm,
            Motor::Flipper => &mut self.flipper,
            Motor::Turntable => &mut self.turntable,
        }
    }

    /// Forget the tracked state before a homing run
    pub(crate) fn invalidate(&mut self) {
        self.homed = false;
    }

    /// Record the state reached by a successful homing run
    pub(crate) fn mark_homed(&mut self) {
        self.orientation = Orientation::REFERENCE;
        self.lock = LockState::Unlocked;
        self.eighths = 0;
        self.arm_offset = 0;
        self.homed = true;
    }

    async fn drive(&mut self, motor: Motor, delta: i32, speed: i32) -> Result<(), RigError> {
        let result = self.actuator(motor).run_relative(delta, speed).await;
        result.map_err(|fault| {
            warn!("{} fault: {}", motor, fault);
            self.homed = false;
            RigError::Actuator(motor, fault)
        })
    }

    fn require_homed(&self) -> Result<(), Interlock> {
        if self.homed {
            Ok(())
        } else {
            Err(Interlock::NotHomed)
        }
    }

    /// Checks shared by every primitive that moves cube layers
    fn require_ready_for_layers(&self) -> Result<(), Interlock> {
        self.require_homed()?;
        if self.arm_offset != 0 {
            return Err(Interlock::ArmDeployed);
        }
        if !self.is_aligned() {
            return Err(Interlock::Misaligned);
        }
        Ok(())
    }
}
