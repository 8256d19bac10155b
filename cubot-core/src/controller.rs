//! Cubot controller
//!
//! Ties the rig, sensors, scanner and move compiler to the state machine.
//! Every public operation checks the current state, dispatches the start
//! event, runs, and dispatches either the completion event or
//! `ErrorDetected`.

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use crate::cube::{parse_algorithm, CubeState, FaceMove, NotationError};
use crate::homing::{home_rig, HomingError};
use crate::kinematics::{Primitive, Rig, RigError};
use crate::motion::{compile, compile_into, optimize, MAX_PLAN_LEN};
use crate::scan::{ScanError, Scanner};
use crate::state::{ErrorKind, Event, State};
use crate::traits::{Actuator, Announcer, ColorSensor, ProximitySensor};

/// Face moves compiled and optimized together
const ALGORITHM_CHUNK: usize = 16;

/// Plan buffer for one algorithm chunk
type ChunkPlan = Vec<Primitive, { ALGORITHM_CHUNK * MAX_PLAN_LEN }>;

/// Controller errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CubotError {
    /// Command not accepted in the current state
    NotReady(State),
    /// Move notation could not be parsed; nothing was executed
    Notation(NotationError),
    Homing(HomingError),
    Scan(ScanError),
    Rig(RigError),
}

impl CubotError {
    /// Error kind recorded in the state machine, `None` for errors that
    /// leave the state unchanged
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CubotError::NotReady(_) | CubotError::Notation(_) => None,
            CubotError::Homing(HomingError::Actuator(..)) => Some(ErrorKind::ActuatorFault),
            CubotError::Homing(HomingError::Sensor(_)) => Some(ErrorKind::SensorFault),
            CubotError::Homing(HomingError::Incomplete) => Some(ErrorKind::HomingIncomplete),
            CubotError::Scan(ScanError::NoCube) => Some(ErrorKind::NoCube),
            CubotError::Scan(ScanError::Sensor(_)) => Some(ErrorKind::SensorFault),
            CubotError::Scan(ScanError::Incomplete) => Some(ErrorKind::ScanIncomplete),
            CubotError::Scan(ScanError::Rig(e)) | CubotError::Rig(e) => Some(rig_error_kind(e)),
        }
    }
}

fn rig_error_kind(e: &RigError) -> ErrorKind {
    match e {
        RigError::Actuator(..) => ErrorKind::ActuatorFault,
        RigError::Interlock(_) => ErrorKind::Interlock,
    }
}

impl From<HomingError> for CubotError {
    fn from(e: HomingError) -> Self {
        CubotError::Homing(e)
    }
}

impl From<ScanError> for CubotError {
    fn from(e: ScanError) -> Self {
        CubotError::Scan(e)
    }
}

impl From<RigError> for CubotError {
    fn from(e: RigError) -> Self {
        CubotError::Rig(e)
    }
}

impl From<NotationError> for CubotError {
    fn from(e: NotationError) -> Self {
        CubotError::Notation(e)
    }
}

/// The cube manipulator
pub struct Cubot<A, C, P, D> {
    rig: Rig<A>,
    color: C,
    proximity: P,
    delay: D,
    scanner: Scanner,
    state: State,
}

impl<A, C, P, D> Cubot<A, C, P, D>
where
    A: Actuator,
    C: ColorSensor,
    P: ProximitySensor,
    D: DelayNs,
{
    /// Create a controller in the `Boot` state
    pub fn new(rig: Rig<A>, color: C, proximity: P, delay: D) -> Self {
        let scanner = Scanner::from_config(rig.config());
        Self {
            rig,
            color,
            proximity,
            delay,
            scanner,
            state: State::Boot,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn rig(&self) -> &Rig<A> {
        &self.rig
    }

    /// Home the rig
    ///
    /// Allowed from `Boot`, `Ready`, `Solved` and `Error`.
    pub async fn home(&mut self) -> Result<(), CubotError> {
        if !self.state.can_home() {
            return Err(CubotError::NotReady(self.state));
        }
        self.dispatch(Event::StartHoming);
        let result = home_rig(&mut self.rig, &mut self.proximity, &mut self.delay).await;
        self.finish(result.map_err(CubotError::from), Event::HomingComplete)
    }

    /// Scan the cube and return its state in the logical frame
    pub async fn scan_cube(&mut self) -> Result<CubeState, CubotError> {
        self.begin(Event::StartScan)?;
        let result = self.scanner.scan_cube(&mut self.rig, &mut self.color).await;
        self.finish(result.map_err(CubotError::from), Event::ScanComplete)
    }

    /// Execute a single face move
    pub async fn execute_move(&mut self, mv: FaceMove) -> Result<(), CubotError> {
        self.begin(Event::StartMove)?;
        info!("move {}", mv);
        let result = self.rig.execute(&compile(mv)).await;
        self.finish(result.map_err(CubotError::from), Event::MoveComplete)
    }

    /// Execute a sequence of face moves
    ///
    /// Moves are compiled in chunks and each chunk is optimized before it
    /// runs, so redundant flips and turns between consecutive moves are
    /// skipped. Stops at the first error.
    pub async fn execute_algorithm(&mut self, moves: &[FaceMove]) -> Result<(), CubotError> {
        self.begin(Event::StartMove)?;
        info!("executing {} moves", moves.len());
        let result = self.run_chunks(moves).await;
        self.finish(result, Event::MoveComplete)
    }

    /// Parse and execute a move sequence such as `"R U R' U'"`
    ///
    /// The whole string is validated before anything moves.
    pub async fn execute_notation(&mut self, algorithm: &str) -> Result<(), CubotError> {
        parse_algorithm(algorithm).try_for_each(|mv| mv.map(drop))?;

        self.begin(Event::StartMove)?;
        let mut result = Ok(());
        let mut chunk: Vec<FaceMove, ALGORITHM_CHUNK> = Vec::new();
        for mv in parse_algorithm(algorithm).flatten() {
            if chunk.push(mv).is_err() {
                result = self.run_chunks(&chunk).await;
                chunk.clear();
                if result.is_err() {
                    break;
                }
                // capacity was just freed
                let _ = chunk.push(mv);
            }
        }
        if result.is_ok() {
            result = self.run_chunks(&chunk).await;
        }
        self.finish(result, Event::MoveComplete)
    }

    /// Report the cube solved
    pub async fn announce_solved<N: Announcer>(
        &mut self,
        announcer: &mut N,
    ) -> Result<(), CubotError> {
        if !self.state.accepts_commands() {
            return Err(CubotError::NotReady(self.state));
        }
        info!("cube solved");
        self.dispatch(Event::Solved);
        announcer.announce_solved().await;
        Ok(())
    }

    /// Stop every actuator and require homing again
    pub fn emergency_stop(&mut self) {
        self.rig.emergency_stop();
        self.dispatch(Event::ErrorDetected(ErrorKind::EmergencyStop));
    }

    async fn run_chunks(&mut self, moves: &[FaceMove]) -> Result<(), CubotError> {
        for chunk in moves.chunks(ALGORITHM_CHUNK) {
            let mut plan = ChunkPlan::new();
            for &mv in chunk {
                // ALGORITHM_CHUNK moves always fit
                let _ = compile_into(mv, &mut plan);
            }
            optimize(&mut plan);
            self.rig.execute(&plan).await?;
        }
        Ok(())
    }

    fn begin(&mut self, start: Event) -> Result<(), CubotError> {
        if !self.state.accepts_commands() {
            return Err(CubotError::NotReady(self.state));
        }
        self.dispatch(start);
        Ok(())
    }

    fn finish<T>(
        &mut self,
        result: Result<T, CubotError>,
        done: Event,
    ) -> Result<T, CubotError> {
        match &result {
            Ok(_) => self.dispatch(done),
            Err(e) => {
                error!("{}", e);
                if let Some(kind) = e.kind() {
                    if kind == ErrorKind::ActuatorFault {
                        self.rig.emergency_stop();
                    }
                    self.dispatch(Event::ErrorDetected(kind));
                }
            }
        }
        result
    }

    fn dispatch(&mut self, event: Event) {
        let next = self.state.transition(event);
        if next != self.state {
            info!("state {} -> {}", self.state, next);
        }
        self.state = next;
    }
}
