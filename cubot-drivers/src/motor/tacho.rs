//! ev3dev tacho motor driver
//!
//! Commands are attribute writes: set the speed and target setpoints, then
//! write the command name. Completion is observed by polling the `state`
//! attribute until `running` clears.
//!
//! Timed and free runs are driven against hard stops, where ev3dev reports
//! `stalled` while the motor pushes. Waits after those commands only look
//! at `running`; a stall fails only a position move.
//!
//! ```ignore
//! let mut turntable = TachoMotor::new(io, delay, TachoConfig {
//!     polarity: Polarity::Inversed,
//!     ..TachoConfig::default()
//! });
//! turntable.init()?;
//! turntable.run_relative(290, 250).await?;
//! ```

use embedded_hal_async::delay::DelayNs;

use cubot_core::traits::{Actuator, ActuatorFault};

use crate::sysfs::{read_value, write_int, AttributeIo, IoError};

/// Attribute names
mod attr {
    pub const COMMAND: &str = "command";
    pub const SPEED_SP: &str = "speed_sp";
    pub const POSITION_SP: &str = "position_sp";
    pub const TIME_SP: &str = "time_sp";
    pub const STATE: &str = "state";
    pub const STOP_ACTION: &str = "stop_action";
    pub const POLARITY: &str = "polarity";
}

/// Command names
mod cmd {
    pub const RUN_TO_REL_POS: &str = "run-to-rel-pos";
    pub const RUN_TIMED: &str = "run-timed";
    pub const RUN_FOREVER: &str = "run-forever";
    pub const STOP: &str = "stop";
}

/// Direction convention of the motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    #[default]
    Normal,
    /// Positive speeds turn the shaft counter-clockwise
    Inversed,
}

impl Polarity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Polarity::Normal => "normal",
            Polarity::Inversed => "inversed",
        }
    }
}

/// What the motor does when a command finishes or is stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopAction {
    Coast,
    #[default]
    Brake,
    Hold,
}

impl StopAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            StopAction::Coast => "coast",
            StopAction::Brake => "brake",
            StopAction::Hold => "hold",
        }
    }
}

/// Tacho motor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TachoConfig {
    pub polarity: Polarity,
    pub stop_action: StopAction,
    /// Interval between `state` polls while waiting
    pub poll_interval_ms: u32,
    /// Give up waiting after this long
    pub timeout_ms: u32,
}

impl Default for TachoConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::Normal,
            stop_action: StopAction::Brake,
            poll_interval_ms: 50,
            timeout_ms: 10_000,
        }
    }
}

/// Flags reported in the `state` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorFlags {
    pub running: bool,
    pub ramping: bool,
    pub holding: bool,
    pub overloaded: bool,
    pub stalled: bool,
}

impl MotorFlags {
    /// Parse a space-separated flag list such as `"running ramping"`
    ///
    /// Unknown flags are ignored.
    pub fn parse(s: &str) -> Self {
        let mut flags = Self::default();
        for flag in s.split_whitespace() {
            match flag {
                "running" => flags.running = true,
                "ramping" => flags.ramping = true,
                "holding" => flags.holding = true,
                "overloaded" => flags.overloaded = true,
                "stalled" => flags.stalled = true,
                _ => {}
            }
        }
        flags
    }
}

/// Tacho motor on an ev3dev output port
pub struct TachoMotor<IO, D> {
    io: IO,
    delay: D,
    config: TachoConfig,
    /// Last command may end against a hard stop
    stall_expected: bool,
}

impl<IO: AttributeIo, D: DelayNs> TachoMotor<IO, D> {
    pub fn new(io: IO, delay: D, config: TachoConfig) -> Self {
        Self {
            io,
            delay,
            config,
            stall_expected: false,
        }
    }

    /// Apply polarity and stop action
    pub fn init(&mut self) -> Result<(), ActuatorFault> {
        self.io
            .write(attr::POLARITY, self.config.polarity.as_str())
            .map_err(fault)?;
        self.io
            .write(attr::STOP_ACTION, self.config.stop_action.as_str())
            .map_err(fault)
    }

    /// Read the current state flags
    pub fn flags(&mut self) -> Result<MotorFlags, ActuatorFault> {
        let state = read_value(&mut self.io, attr::STATE).map_err(fault)?;
        Ok(MotorFlags::parse(&state))
    }

    /// Give back the attribute transport and delay
    pub fn release(self) -> (IO, D) {
        (self.io, self.delay)
    }

    fn command(&mut self, command: &str) -> Result<(), ActuatorFault> {
        self.io.write(attr::COMMAND, command).map_err(fault)
    }

    fn set(&mut self, name: &str, value: i32) -> Result<(), ActuatorFault> {
        write_int(&mut self.io, name, value).map_err(fault)
    }
}

impl<IO: AttributeIo, D: DelayNs> Actuator for TachoMotor<IO, D> {
    fn move_relative(&mut self, delta: i32, speed: i32) -> Result<(), ActuatorFault> {
        self.stall_expected = false;
        self.set(attr::SPEED_SP, speed)?;
        self.set(attr::POSITION_SP, delta)?;
        self.command(cmd::RUN_TO_REL_POS)
    }

    fn run_timed(&mut self, speed: i32, duration_ms: u32) -> Result<(), ActuatorFault> {
        let duration = i32::try_from(duration_ms).map_err(|_| ActuatorFault::Rejected)?;
        self.stall_expected = true;
        self.set(attr::SPEED_SP, speed)?;
        self.set(attr::TIME_SP, duration)?;
        self.command(cmd::RUN_TIMED)
    }

    fn run_until_stopped(&mut self, speed: i32) -> Result<(), ActuatorFault> {
        self.stall_expected = true;
        self.set(attr::SPEED_SP, speed)?;
        self.command(cmd::RUN_FOREVER)
    }

    fn stop(&mut self) -> Result<(), ActuatorFault> {
        self.command(cmd::STOP)
    }

    async fn wait_until_idle(&mut self) -> Result<(), ActuatorFault> {
        let mut waited_ms = 0u32;
        loop {
            let flags = self.flags()?;
            if flags.stalled && !self.stall_expected {
                return Err(ActuatorFault::Stalled);
            }
            if flags.overloaded {
                return Err(ActuatorFault::Overloaded);
            }
            if !flags.running {
                return Ok(());
            }
            if waited_ms >= self.config.timeout_ms {
                return Err(ActuatorFault::Timeout);
            }
            self.delay.delay_ms(self.config.poll_interval_ms).await;
            waited_ms = waited_ms.saturating_add(self.config.poll_interval_ms);
        }
    }
}

fn fault(e: IoError) -> ActuatorFault {
    match e {
        IoError::NotFound | IoError::Io => ActuatorFault::Unreachable,
        IoError::InvalidValue => ActuatorFault::Rejected,
    }
}
