//! Motion primitives

use crate::cube::Amount;

/// Physical motion the rig can perform directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Primitive {
    /// Flip the whole cube: R goes to U, U to L, L to D, D to R
    Reorient,
    /// Clamp the upper two layers
    Hold,
    /// Unclamp the upper two layers
    Release,
    /// Turn the turntable. Turns the whole cube when released, only the
    /// bottom layer when held.
    Turn(Amount),
}

/// Whether the upper two layers are clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockState {
    #[default]
    Unlocked,
    Locked,
}

impl LockState {
    pub const fn is_locked(self) -> bool {
        matches!(self, LockState::Locked)
    }
}

/// The rig's three actuators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    /// Color sensor arm
    Arm,
    /// Flipper / cradle
    Flipper,
    /// Turntable under the cube
    Turntable,
}
