//! Cube orientation tracking
//!
//! The rig only ever sees physical positions. [`Orientation`] records which
//! logical face currently sits at each physical position so that scans can
//! be reported, and moves compiled, in the logical frame.

use crate::cube::{Amount, Face, Vec3};

/// Logical face at each physical position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    at: [Face; 6],
}

impl Orientation {
    /// Every logical face at its own physical position
    pub const REFERENCE: Orientation = Orientation { at: Face::ALL };

    pub const fn reference() -> Self {
        Self::REFERENCE
    }

    /// Logical face currently at physical position `position`
    pub const fn face_at(&self, position: Face) -> Face {
        self.at[position.index()]
    }

    /// Physical position currently holding logical face `face`
    pub fn position_of(&self, face: Face) -> Face {
        Face::ALL
            .into_iter()
            .find(|&p| self.face_at(p) == face)
            .unwrap_or(face)
    }

    pub fn is_reference(&self) -> bool {
        *self == Self::REFERENCE
    }

    /// Map a vector from the physical frame into the logical frame
    pub fn to_logical(&self, v: Vec3) -> Vec3 {
        let x = self.face_at(Face::Right).normal().scale(v.x);
        let y = self.face_at(Face::Up).normal().scale(v.y);
        let z = self.face_at(Face::Front).normal().scale(v.z);
        x.add(y).add(z)
    }

    /// Track one flip: R to U, U to L, L to D, D to R
    pub(crate) fn reorient(&mut self) {
        let old = self.at;
        self.set(Face::Up, old[Face::Right.index()]);
        self.set(Face::Left, old[Face::Up.index()]);
        self.set(Face::Down, old[Face::Left.index()]);
        self.set(Face::Right, old[Face::Down.index()]);
    }

    /// Track a whole-cube turntable turn, clockwise seen from above the
    /// turntable: F to R, R to B, B to L, L to F
    pub(crate) fn spin(&mut self, amount: Amount) {
        for _ in 0..amount.clockwise_quarters() {
            let old = self.at;
            self.set(Face::Right, old[Face::Front.index()]);
            self.set(Face::Back, old[Face::Right.index()]);
            self.set(Face::Left, old[Face::Back.index()]);
            self.set(Face::Front, old[Face::Left.index()]);
        }
    }

    fn set(&mut self, position: Face, face: Face) {
        self.at[position.index()] = face;
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::REFERENCE
    }
}
