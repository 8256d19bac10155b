//! Scan controller
//!
//! Reads all 54 facelets with the single color sensor. Each side is read
//! center first, then the four edge and four corner facelets while the
//! turntable indexes in eighth turns under the arm. Between sides the
//! cube is flipped and turned so that every face passes under the sensor
//! exactly once and the cube ends in its starting orientation.
//!
//! Readings are taken in the physical frame and recorded in the logical
//! frame through the rig's tracked orientation.

use crate::color::{ClassifyError, ColorClassifier, ReadError};
use crate::config::RigConfig;
use crate::cube::geometry::locate_facelet;
use crate::cube::{Amount, CubeState, Face, FaceletColor, Vec3};
use crate::kinematics::{Rig, RigError};
use crate::traits::{Actuator, ColorSensor, SensorFault};

/// Scan errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanError {
    /// A facelet did not classify as a sticker color; no cube in the cradle
    NoCube,
    /// Color sensor fault
    Sensor(SensorFault),
    /// Rig refused or failed a motion
    Rig(RigError),
    /// The traversal did not read every facelet exactly once
    Incomplete,
}

impl From<RigError> for ScanError {
    fn from(e: RigError) -> Self {
        ScanError::Rig(e)
    }
}

impl From<ReadError> for ScanError {
    fn from(e: ReadError) -> Self {
        match e {
            ReadError::Sensor(fault) => ScanError::Sensor(fault),
            ReadError::Classify(ClassifyError::UnrecognizedFacelet(_)) => ScanError::NoCube,
        }
    }
}

/// One step of the side traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    ScanSide,
    Reorient,
    Turn(Amount),
}

/// Visits U, R, F, L, B, D in that order and returns to the start
const TRAVERSAL: [Step; 16] = [
    Step::ScanSide,
    Step::Reorient,
    Step::Turn(Amount::Clockwise),
    Step::ScanSide,
    Step::Reorient,
    Step::ScanSide,
    Step::Reorient,
    Step::ScanSide,
    Step::Reorient,
    Step::ScanSide,
    Step::Turn(Amount::CounterClockwise),
    Step::Reorient,
    Step::ScanSide,
    Step::Reorient,
    Step::Reorient,
    Step::Turn(Amount::Clockwise),
];

/// Outward normal of the face under the sensor
const UP: Vec3 = Vec3::new(0, 1, 0);
/// Center cubie of the top face
const CENTER_PROBE: Vec3 = Vec3::new(0, 1, 0);
/// Edge cubie on the arm's side of the top face
const EDGE_PROBE: Vec3 = Vec3::new(1, 1, 0);
/// Corner cubie that swings under the arm after one eighth turn
const CORNER_PROBE: Vec3 = Vec3::new(1, 1, 1);

/// Readings collected so far, by logical face and facelet
type Slots = [[Option<FaceletColor>; 9]; 6];

/// Drives the rig and color sensor through a full-cube scan
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner {
    classifier: ColorClassifier,
}

impl Scanner {
    pub const fn new(classifier: ColorClassifier) -> Self {
        Self { classifier }
    }

    pub const fn from_config(config: &RigConfig) -> Self {
        Self::new(ColorClassifier::from_config(&config.classifier))
    }

    /// Scan all six faces
    ///
    /// The rig must be homed, unlocked and parked. On success the cube is
    /// back in the orientation it started in. On `NoCube` no further
    /// hardware call is made after the failing read.
    pub async fn scan_cube<A, C>(
        &self,
        rig: &mut Rig<A>,
        sensor: &mut C,
    ) -> Result<CubeState, ScanError>
    where
        A: Actuator,
        C: ColorSensor,
    {
        info!("scanning cube");
        let mut slots: Slots = [[None; 9]; 6];

        for step in TRAVERSAL {
            match step {
                Step::ScanSide => self.scan_side(rig, sensor, &mut slots).await?,
                Step::Reorient => rig.reorient_cube().await?,
                Step::Turn(amount) => rig.turn_layer(amount).await?,
            }
        }

        let mut faces = [[FaceletColor::White; 9]; 6];
        for (face, readings) in faces.iter_mut().zip(slots.iter()) {
            for (facelet, reading) in face.iter_mut().zip(readings.iter()) {
                *facelet = reading.ok_or(ScanError::Incomplete)?;
            }
        }
        info!("scan complete");
        Ok(CubeState::from_faces(faces))
    }

    /// Read the nine facelets of the face currently on top
    async fn scan_side<A, C>(
        &self,
        rig: &mut Rig<A>,
        sensor: &mut C,
        slots: &mut Slots,
    ) -> Result<(), ScanError>
    where
        A: Actuator,
        C: ColorSensor,
    {
        let arm = rig.config().arm;
        debug!("scanning side {}", rig.orientation().face_at(Face::Up));

        rig.move_arm(arm.center_offset).await?;
        self.read_into(rig, sensor, slots, CENTER_PROBE)?;

        for _ in 0..4 {
            rig.move_arm(arm.edge_offset).await?;
            self.read_into(rig, sensor, slots, EDGE_PROBE)?;

            // orientation only updates on the second eighth, so the corner
            // is still addressed in the frame before the turn
            rig.index_turntable().await?;
            rig.move_arm(arm.corner_offset).await?;
            self.read_into(rig, sensor, slots, CORNER_PROBE)?;
            rig.index_turntable().await?;
        }

        rig.park_arm().await?;
        Ok(())
    }

    /// Read one facelet at physical cubie `probe` on the top face
    fn read_into<A, C>(
        &self,
        rig: &Rig<A>,
        sensor: &mut C,
        slots: &mut Slots,
        probe: Vec3,
    ) -> Result<(), ScanError>
    where
        A: Actuator,
        C: ColorSensor,
    {
        let color = self.classifier.read(sensor).map_err(|e| {
            warn!("facelet read failed: {}", e);
            ScanError::from(e)
        })?;

        let orientation = rig.orientation();
        let normal = orientation.to_logical(UP);
        let position = orientation.to_logical(probe);
        let (face, index) = locate_facelet(normal, position).ok_or(ScanError::Incomplete)?;
        let slot = &mut slots[face.index()][index as usize];
        if slot.is_some() {
            return Err(ScanError::Incomplete);
        }
        *slot = Some(color);
        Ok(())
    }
}
