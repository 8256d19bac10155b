//! 54-facelet cube state

use super::geometry::{facelet_position, locate_facelet, Axis, Vec3};
use super::{Face, FaceMove, FaceletColor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Colors of all 54 facelets, indexed by `[Face::index()][facelet]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubeState {
    faces: [[FaceletColor; 9]; 6],
}

impl CubeState {
    /// Build from per-face facelet arrays in [`Face::ALL`] order
    pub const fn from_faces(faces: [[FaceletColor; 9]; 6]) -> Self {
        Self { faces }
    }

    /// Every face a single color, `colors` in [`Face::ALL`] order
    pub const fn uniform(colors: [FaceletColor; 6]) -> Self {
        Self {
            faces: [
                [colors[0]; 9],
                [colors[1]; 9],
                [colors[2]; 9],
                [colors[3]; 9],
                [colors[4]; 9],
                [colors[5]; 9],
            ],
        }
    }

    /// Solved cube in the usual color scheme: white up, green front
    pub const fn solved() -> Self {
        Self::uniform([
            FaceletColor::White,
            FaceletColor::Green,
            FaceletColor::Orange,
            FaceletColor::Blue,
            FaceletColor::Red,
            FaceletColor::Yellow,
        ])
    }

    pub fn faces(&self) -> &[[FaceletColor; 9]; 6] {
        &self.faces
    }

    pub fn face(&self, face: Face) -> &[FaceletColor; 9] {
        &self.faces[face.index()]
    }

    /// Color of a single facelet, `None` for an index outside 0..9
    pub fn get(&self, face: Face, index: u8) -> Option<FaceletColor> {
        self.faces[face.index()].get(index as usize).copied()
    }

    pub fn center(&self, face: Face) -> FaceletColor {
        self.faces[face.index()][4]
    }

    /// True when every face shows a single color
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|face| face.iter().all(|&c| c == face[4]))
    }

    /// Apply one face move
    pub fn apply(&mut self, mv: FaceMove) {
        let (axis, positive) = mv.face.axis();
        let quarters = mv.amount.clockwise_quarters();
        // clockwise seen from a negative face is counter-clockwise about the axis
        let quarters = if positive { quarters } else { (4 - quarters) % 4 };
        let layer = if positive { 1 } else { -1 };
        self.turn_slice(axis, layer, quarters);
    }

    pub fn apply_all(&mut self, moves: &[FaceMove]) {
        for &mv in moves {
            self.apply(mv);
        }
    }

    /// Rotate the whole cube clockwise about `axis`
    pub fn rotate(&mut self, axis: Axis, quarters: u8) {
        self.transform(axis, quarters, |_| true);
    }

    /// Rotate the slice `layer` (-1, 0 or 1 along `axis`) clockwise about
    /// `axis`
    pub(crate) fn turn_slice(&mut self, axis: Axis, layer: i8, quarters: u8) {
        let unit = axis.unit();
        self.transform(axis, quarters, |p| p.dot(unit) == layer);
    }

    /// Color of the facelet with outward normal `normal` on cubie `position`
    #[cfg(test)]
    pub(crate) fn color_at(&self, normal: Vec3, position: Vec3) -> Option<FaceletColor> {
        let (face, index) = locate_facelet(normal, position)?;
        self.get(face, index)
    }

    fn transform(&mut self, axis: Axis, quarters: u8, select: impl Fn(Vec3) -> bool) {
        if quarters % 4 == 0 {
            return;
        }
        let mut next = self.faces;
        for face in Face::ALL {
            for index in 0..9u8 {
                let position = facelet_position(face, index);
                if !select(position) {
                    continue;
                }
                let normal = axis.rotate(face.normal(), quarters);
                let position = axis.rotate(position, quarters);
                if let Some((to, slot)) = locate_facelet(normal, position) {
                    next[to.index()][slot as usize] = self.faces[face.index()][index as usize];
                }
            }
        }
        self.faces = next;
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}
