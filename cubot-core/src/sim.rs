//! Simulated rig for host tests
//!
//! Interprets the raw actuator commands the way the mechanism would and
//! keeps the cube in the physical frame. Nothing here reuses the tracked
//! orientation or the compiler, so tests compare two independent models.

use std::cell::{RefCell, RefMut};

use embedded_hal_async::delay::DelayNs;

use crate::config::RigConfig;
use crate::cube::{Axis, CubeState, FaceletColor, Vec3};
use crate::kinematics::{Motor, Rig};
use crate::traits::{
    Actuator, ActuatorFault, Announcer, ColorSensor, ProximitySensor, RawHueClass, SensorFault,
};

pub(crate) type SimRig<'w> = Rig<SimMotor<'w>>;

const UP: Vec3 = Vec3::new(0, 1, 0);

/// A hardware access, in the order the rig made them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Call {
    Command(Motor),
    Stop(Motor),
    ColorRead,
    ProximityRead,
}

struct Inner {
    /// Cube in the physical frame
    cube: CubeState,
    present: bool,
    /// Flipper travel from rest
    flipper: i32,
    locked: bool,
    /// Sensor arm position from its hard stop
    arm: i32,
    /// Turntable travel not yet converted to eighths
    table_travel: i32,
    /// Eighths turned since the last quarter position, -1..=1
    table_eighths: i8,
    table_free: bool,
    proximity_reads: u32,
    /// `proximity_reads` when the current search started
    search_start: u32,
    proximity_trigger: Option<u32>,
    proximity_fault: Option<SensorFault>,
    delays: u32,
    commands: usize,
    moves: Vec<(Motor, i32)>,
    timed: Vec<(Motor, i32, u32)>,
    stops: usize,
    fail_next: Option<(Motor, ActuatorFault)>,
    fail_stop: Option<Motor>,
    color_reads: usize,
    color_fault: Option<(usize, Result<RawHueClass, SensorFault>)>,
    announcements: u32,
    log: Vec<Call>,
}

pub(crate) struct World {
    config: RigConfig,
    inner: RefCell<Inner>,
}

impl World {
    pub(crate) fn new() -> Self {
        Self::with_cube(CubeState::solved())
    }

    pub(crate) fn with_cube(cube: CubeState) -> Self {
        Self {
            config: RigConfig::default(),
            inner: RefCell::new(Inner {
                cube,
                present: true,
                flipper: 0,
                locked: false,
                arm: 0,
                table_travel: 0,
                table_eighths: 0,
                table_free: false,
                proximity_reads: 0,
                search_start: 0,
                proximity_trigger: Some(3),
                proximity_fault: None,
                delays: 0,
                commands: 0,
                moves: Vec::new(),
                timed: Vec::new(),
                stops: 0,
                fail_next: None,
                fail_stop: None,
                color_reads: 0,
                color_fault: None,
                announcements: 0,
                log: Vec::new(),
            }),
        }
    }

    pub(crate) fn config(&self) -> &RigConfig {
        &self.config
    }

    /// Rig over this world, not yet homed
    pub(crate) fn rig(&self) -> SimRig<'_> {
        Rig::new(
            SimMotor::new(self, Motor::Arm),
            SimMotor::new(self, Motor::Flipper),
            SimMotor::new(self, Motor::Turntable),
            self.config,
        )
        .unwrap()
    }

    /// Rig as a completed homing run would leave it
    pub(crate) fn homed_rig(&self) -> SimRig<'_> {
        let mut rig = self.rig();
        self.inner.borrow_mut().arm = self.config.arm.park_offset;
        rig.mark_homed();
        rig
    }

    pub(crate) fn color(&self) -> SimColor<'_> {
        SimColor { world: self }
    }

    pub(crate) fn proximity(&self) -> SimProximity<'_> {
        SimProximity { world: self }
    }

    pub(crate) fn delay(&self) -> SimDelay<'_> {
        SimDelay { world: self }
    }

    pub(crate) fn announcer(&self) -> SimAnnouncer<'_> {
        SimAnnouncer { world: self }
    }

    /// Physical cube state
    pub(crate) fn cube(&self) -> CubeState {
        self.inner.borrow().cube.clone()
    }

    pub(crate) fn is_locked(&self) -> bool {
        self.inner.borrow().locked
    }

    pub(crate) fn remove_cube(&self) {
        self.inner.borrow_mut().present = false;
    }

    /// Actuator commands issued so far, stops included
    pub(crate) fn command_count(&self) -> usize {
        self.inner.borrow().commands
    }

    /// Most recent hardware access
    pub(crate) fn last_call(&self) -> Option<Call> {
        self.inner.borrow().log.last().copied()
    }

    pub(crate) fn moves(&self, motor: Motor) -> Vec<i32> {
        self.inner
            .borrow()
            .moves
            .iter()
            .filter(|(m, _)| *m == motor)
            .map(|&(_, d)| d)
            .collect()
    }

    pub(crate) fn timed_runs(&self) -> Vec<(Motor, i32, u32)> {
        self.inner.borrow().timed.clone()
    }

    pub(crate) fn stop_count(&self) -> usize {
        self.inner.borrow().stops
    }

    pub(crate) fn color_reads(&self) -> usize {
        self.inner.borrow().color_reads
    }

    pub(crate) fn delays(&self) -> u32 {
        self.inner.borrow().delays
    }

    pub(crate) fn announcements(&self) -> u32 {
        self.inner.borrow().announcements
    }

    /// Fail the next command sent to `motor`
    pub(crate) fn fail_next(&self, motor: Motor, fault: ActuatorFault) {
        self.inner.borrow_mut().fail_next = Some((motor, fault));
    }

    pub(crate) fn fail_stop(&self, motor: Motor) {
        self.inner.borrow_mut().fail_stop = Some(motor);
    }

    /// After `reads` good color reads, every read returns `result`
    pub(crate) fn break_color_after(&self, reads: usize, result: Result<RawHueClass, SensorFault>) {
        self.inner.borrow_mut().color_fault = Some((reads, result));
    }

    pub(crate) fn proximity_never_triggers(&self) {
        self.inner.borrow_mut().proximity_trigger = None;
    }

    /// Every proximity read fails with `fault`
    pub(crate) fn break_proximity(&self, fault: SensorFault) {
        self.inner.borrow_mut().proximity_fault = Some(fault);
    }

    fn command(&self, motor: Motor) -> Result<RefMut<'_, Inner>, ActuatorFault> {
        let mut inner = self.inner.borrow_mut();
        inner.commands += 1;
        inner.log.push(Call::Command(motor));
        let pending = inner.fail_next;
        match pending {
            Some((m, fault)) if m == motor => {
                inner.fail_next = None;
                Err(fault)
            }
            _ => Ok(inner),
        }
    }

    /// Color of the facelet under the sensor, if the sensor is over one
    fn facelet_under_sensor(&self) -> Option<FaceletColor> {
        let inner = self.inner.borrow();
        if !inner.present {
            return None;
        }
        let arm = &self.config.arm;
        let offset = inner.arm - arm.park_offset;
        let probe = match (offset, inner.table_eighths) {
            (o, 0) if o == arm.center_offset => Vec3::new(0, 1, 0),
            (o, 0) if o == arm.edge_offset => Vec3::new(1, 1, 0),
            // one eighth past a quarter position the front-right corner
            // has swung round to face the arm
            (o, 1) if o == arm.corner_offset => Vec3::new(1, 1, 1),
            _ => return None,
        };
        inner.cube.color_at(UP, probe)
    }
}

impl Inner {
    fn move_flipper(&mut self, delta: i32, config: &RigConfig) {
        let before = self.flipper;
        self.flipper += delta;
        let hold = config.flipper.hold_travel;
        let reorient = config.flipper.reorient_travel;
        match (before, self.flipper) {
            (0, f) if f == hold => self.locked = true,
            (b, 0) if b == hold => self.locked = false,
            // R goes up: counter-clockwise about the front axis
            (b, 0) if b == reorient => self.cube.rotate(Axis::Z, 3),
            _ => {}
        }
    }

    fn move_turntable(&mut self, delta: i32, config: &RigConfig) {
        let eighth = config.turntable.net_quarter() / 2;
        self.table_travel += delta;
        while self.table_travel >= eighth {
            self.table_travel -= eighth;
            self.step_turntable(1);
        }
        while self.table_travel <= -eighth {
            self.table_travel += eighth;
            self.step_turntable(-1);
        }
    }

    fn step_turntable(&mut self, dir: i8) {
        self.table_eighths += dir;
        if self.table_eighths.abs() < 2 {
            return;
        }
        // clockwise seen from below is counter-clockwise about +y
        let quarters = if self.table_eighths > 0 { 3 } else { 1 };
        if self.locked {
            self.cube.turn_slice(Axis::Y, -1, quarters);
        } else {
            self.cube.rotate(Axis::Y, quarters);
        }
        self.table_eighths = 0;
    }
}

pub(crate) struct SimMotor<'w> {
    world: &'w World,
    motor: Motor,
}

impl<'w> SimMotor<'w> {
    pub(crate) fn new(world: &'w World, motor: Motor) -> Self {
        Self { world, motor }
    }
}

impl Actuator for SimMotor<'_> {
    fn move_relative(&mut self, delta: i32, _speed: i32) -> Result<(), ActuatorFault> {
        let mut inner = self.world.command(self.motor)?;
        inner.moves.push((self.motor, delta));
        let config = &self.world.config;
        match self.motor {
            Motor::Arm => inner.arm += delta,
            Motor::Flipper => inner.move_flipper(delta, config),
            Motor::Turntable => inner.move_turntable(delta, config),
        }
        Ok(())
    }

    fn run_timed(&mut self, speed: i32, duration_ms: u32) -> Result<(), ActuatorFault> {
        let mut inner = self.world.command(self.motor)?;
        inner.timed.push((self.motor, speed, duration_ms));
        let config = &self.world.config;
        match self.motor {
            // against the hard stop
            Motor::Arm => inner.arm = 0,
            Motor::Flipper => {
                inner.flipper = -config.flipper.rest_offset;
                inner.locked = false;
            }
            Motor::Turntable => {}
        }
        Ok(())
    }

    fn run_until_stopped(&mut self, _speed: i32) -> Result<(), ActuatorFault> {
        let mut inner = self.world.command(self.motor)?;
        if self.motor == Motor::Turntable {
            inner.table_free = true;
            inner.search_start = inner.proximity_reads;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<(), ActuatorFault> {
        let mut inner = self.world.inner.borrow_mut();
        inner.commands += 1;
        inner.stops += 1;
        inner.log.push(Call::Stop(self.motor));
        if inner.fail_stop == Some(self.motor) {
            return Err(ActuatorFault::Unreachable);
        }
        if self.motor == Motor::Turntable && inner.table_free {
            // stopped on the reference mark
            inner.table_free = false;
            inner.table_travel = 0;
            inner.table_eighths = 0;
        }
        Ok(())
    }

    async fn wait_until_idle(&mut self) -> Result<(), ActuatorFault> {
        Ok(())
    }
}

pub(crate) struct SimColor<'w> {
    world: &'w World,
}

impl ColorSensor for SimColor<'_> {
    fn read_color_class(&mut self) -> Result<RawHueClass, SensorFault> {
        let broken = {
            let mut inner = self.world.inner.borrow_mut();
            inner.color_reads += 1;
            inner.log.push(Call::ColorRead);
            match inner.color_fault {
                Some((after, result)) if inner.color_reads > after => Some(result),
                _ => None,
            }
        };
        if let Some(result) = broken {
            return result;
        }
        Ok(match self.world.facelet_under_sensor() {
            None => RawHueClass::NoColor,
            Some(FaceletColor::White) => RawHueClass::White,
            Some(FaceletColor::Yellow) => RawHueClass::Yellow,
            Some(FaceletColor::Green) => RawHueClass::Green,
            Some(FaceletColor::Blue) => RawHueClass::Blue,
            Some(FaceletColor::Red | FaceletColor::Orange) => RawHueClass::Red,
        })
    }

    fn read_reflected_intensity(&mut self) -> Result<u8, SensorFault> {
        let mut inner = self.world.inner.borrow_mut();
        inner.color_reads += 1;
        inner.log.push(Call::ColorRead);
        drop(inner);
        Ok(match self.world.facelet_under_sensor() {
            Some(FaceletColor::Orange) => 80,
            Some(FaceletColor::Red) => 40,
            Some(_) => 60,
            None => 5,
        })
    }
}

pub(crate) struct SimProximity<'w> {
    world: &'w World,
}

impl ProximitySensor for SimProximity<'_> {
    fn read_proximity(&mut self) -> Result<u8, SensorFault> {
        let mut inner = self.world.inner.borrow_mut();
        inner.proximity_reads += 1;
        inner.log.push(Call::ProximityRead);
        if let Some(fault) = inner.proximity_fault {
            return Err(fault);
        }
        let searched = inner.proximity_reads - inner.search_start;
        let on_mark = inner.table_free && inner.proximity_trigger.is_some_and(|n| searched >= n);
        Ok(if on_mark { 60 } else { 10 })
    }
}

pub(crate) struct SimDelay<'w> {
    world: &'w World,
}

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, _ns: u32) {
        self.world.inner.borrow_mut().delays += 1;
    }
}

pub(crate) struct SimAnnouncer<'w> {
    world: &'w World,
}

impl Announcer for SimAnnouncer<'_> {
    async fn announce_solved(&mut self) {
        self.world.inner.borrow_mut().announcements += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::{Amount, Face, FaceMove};
    use embassy_futures::block_on;

    #[test]
    fn test_locked_quarter_turns_bottom_layer() {
        let world = World::new();
        let mut rig = world.homed_rig();
        block_on(rig.hold_layers()).unwrap();
        assert!(world.is_locked());
        block_on(rig.turn_layer(Amount::Clockwise)).unwrap();
        block_on(rig.release_layers()).unwrap();

        let mut expected = CubeState::solved();
        expected.apply(FaceMove::new(Face::Down, Amount::Clockwise));
        assert_eq!(world.cube(), expected);
    }

    #[test]
    fn test_two_eighths_make_a_quarter() {
        let a = World::new();
        let mut rig = a.homed_rig();
        block_on(rig.index_turntable()).unwrap();
        block_on(rig.index_turntable()).unwrap();

        let b = World::new();
        let mut rig = b.homed_rig();
        block_on(rig.turn_layer(Amount::Clockwise)).unwrap();
        assert_eq!(a.cube(), b.cube());
    }
}
