//! Face moves and standard notation

use core::fmt;
use core::str::FromStr;

use super::Face;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Turn amount of a face move, viewed from outside the face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Amount {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Amount {
    pub const ALL: [Amount; 3] = [Amount::Clockwise, Amount::CounterClockwise, Amount::Half];

    /// Signed quarter turns: +1, -1 or +2
    pub const fn quarters(self) -> i8 {
        match self {
            Amount::Clockwise => 1,
            Amount::CounterClockwise => -1,
            Amount::Half => 2,
        }
    }

    /// Equivalent number of clockwise quarter turns (1, 2 or 3)
    pub const fn clockwise_quarters(self) -> u8 {
        self.quarters().rem_euclid(4) as u8
    }

    /// Amount for a net signed quarter count, `None` for a full turn
    pub const fn from_quarters(quarters: i8) -> Option<Amount> {
        match quarters.rem_euclid(4) {
            1 => Some(Amount::Clockwise),
            2 => Some(Amount::Half),
            3 => Some(Amount::CounterClockwise),
            _ => None,
        }
    }

    pub const fn inverse(self) -> Amount {
        match self {
            Amount::Clockwise => Amount::CounterClockwise,
            Amount::CounterClockwise => Amount::Clockwise,
            Amount::Half => Amount::Half,
        }
    }

    const fn suffix(self) -> &'static str {
        match self {
            Amount::Clockwise => "",
            Amount::CounterClockwise => "'",
            Amount::Half => "2",
        }
    }
}

/// A single face move such as `R`, `U'` or `F2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceMove {
    pub face: Face,
    pub amount: Amount,
}

impl FaceMove {
    pub const fn new(face: Face, amount: Amount) -> Self {
        Self { face, amount }
    }

    /// The move that undoes this one
    pub const fn inverse(self) -> FaceMove {
        FaceMove::new(self.face, self.amount.inverse())
    }
}

/// Move notation parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotationError {
    /// Empty token
    Empty,
    /// First character is not one of U, D, L, R, F, B
    UnknownFace(char),
    /// Anything after the face letter other than `'`, `2` or `2'`
    UnknownSuffix,
}

impl fmt::Display for NotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotationError::Empty => write!(f, "empty move"),
            NotationError::UnknownFace(c) => write!(f, "unknown face '{}'", c),
            NotationError::UnknownSuffix => write!(f, "unknown move suffix"),
        }
    }
}

impl FromStr for FaceMove {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(NotationError::Empty)?;
        let face = Face::from_letter(letter).ok_or(NotationError::UnknownFace(letter))?;
        let amount = match chars.as_str() {
            "" => Amount::Clockwise,
            "'" => Amount::CounterClockwise,
            "2" | "2'" => Amount::Half,
            _ => return Err(NotationError::UnknownSuffix),
        };
        Ok(FaceMove::new(face, amount))
    }
}

impl fmt::Display for FaceMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.amount.suffix())
    }
}

/// Parse a whitespace-separated move sequence such as `"R U R' U'"`
pub fn parse_algorithm(s: &str) -> impl Iterator<Item = Result<FaceMove, NotationError>> + '_ {
    s.split_whitespace().map(str::parse)
}
