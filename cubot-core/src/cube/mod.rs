//! Cube model
//!
//! Faces, facelet colors, face moves and the 54-facelet cube state.
//!
//! Facelets on a face are numbered 0..9 in row-major order as seen when
//! looking straight at that face from outside, with U drawn above F and
//! F drawn above D. Index 4 is the center, 1/3/5/7 are edges and 0/2/6/8
//! are corners.

pub mod geometry;
mod moves;
mod state;

pub use geometry::{Axis, Vec3};
pub use moves::{parse_algorithm, Amount, FaceMove, NotationError};
pub use state::CubeState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A face of the cube, named by its logical position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Face {
    Up,
    Front,
    Left,
    Back,
    Right,
    Down,
}

impl Face {
    /// All faces, in the order scan results are reported
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Front,
        Face::Left,
        Face::Back,
        Face::Right,
        Face::Down,
    ];

    /// Index into [`Face::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter notation name
    pub const fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Front => 'F',
            Face::Left => 'L',
            Face::Back => 'B',
            Face::Right => 'R',
            Face::Down => 'D',
        }
    }

    /// Parse a notation letter
    pub const fn from_letter(c: char) -> Option<Face> {
        match c {
            'U' => Some(Face::Up),
            'F' => Some(Face::Front),
            'L' => Some(Face::Left),
            'B' => Some(Face::Back),
            'R' => Some(Face::Right),
            'D' => Some(Face::Down),
            _ => None,
        }
    }

    /// The face on the opposite side of the cube
    pub const fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }
}

/// Sticker color of a single facelet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FaceletColor {
    White,
    Yellow,
    Red,
    Orange,
    Green,
    Blue,
}

impl FaceletColor {
    pub const ALL: [FaceletColor; 6] = [
        FaceletColor::White,
        FaceletColor::Yellow,
        FaceletColor::Red,
        FaceletColor::Orange,
        FaceletColor::Green,
        FaceletColor::Blue,
    ];

    /// Single lowercase letter used in compact state dumps
    pub const fn letter(self) -> char {
        match self {
            FaceletColor::White => 'w',
            FaceletColor::Yellow => 'y',
            FaceletColor::Red => 'r',
            FaceletColor::Orange => 'o',
            FaceletColor::Green => 'g',
            FaceletColor::Blue => 'b',
        }
    }
}

/// Position class of a facelet within its face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceletKind {
    Center,
    Edge,
    Corner,
}

impl FaceletKind {
    /// Classify a facelet index, `None` when out of range
    pub const fn of(index: u8) -> Option<FaceletKind> {
        match index {
            4 => Some(FaceletKind::Center),
            1 | 3 | 5 | 7 => Some(FaceletKind::Edge),
            0 | 2 | 6 | 8 => Some(FaceletKind::Corner),
            _ => None,
        }
    }
}
