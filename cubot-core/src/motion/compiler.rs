//! Face move compiler
//!
//! The rig can only turn the bottom layer (D) directly. Every other face
//! move is compiled into reorientations and whole-cube turns that bring the
//! target face to the bottom, the D turn itself, and the inverse motions
//! that restore the cube's orientation.
//!
//! Each plan leaves the orientation where it found it and ends unlocked.

use heapless::Vec;

use crate::cube::{Amount, Face, FaceMove};
use crate::kinematics::Primitive;

/// Longest plan a single face move compiles to
pub const MAX_PLAN_LEN: usize = 16;

/// Primitive sequence for one face move
pub type Plan = Vec<Primitive, MAX_PLAN_LEN>;

/// Output buffer ran out of capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlanOverflow;

/// Compile a single face move into a primitive plan
pub fn compile(mv: FaceMove) -> Plan {
    let mut plan = Plan::new();
    // longest sequence is 9 primitives
    let _ = compile_into(mv, &mut plan);
    plan
}

/// Append the plan for `mv` to `out`
///
/// On overflow `out` holds a truncated plan and must not be executed.
pub fn compile_into<const N: usize>(
    mv: FaceMove,
    out: &mut Vec<Primitive, N>,
) -> Result<(), PlanOverflow> {
    let a = mv.amount;
    match mv.face {
        Face::Down => bottom(a, out),
        Face::Up => {
            repeat(Primitive::Reorient, 2, out)?;
            bottom(a, out)?;
            repeat(Primitive::Reorient, 2, out)
        }
        Face::Left => left(a, out),
        Face::Right => bracket(Amount::Half, a, Amount::Half, out),
        Face::Front => bracket(Amount::CounterClockwise, a, Amount::Clockwise, out),
        Face::Back => bracket(Amount::Clockwise, a, Amount::CounterClockwise, out),
    }
}

/// Hold, turn the bottom layer, release
fn bottom<const N: usize>(a: Amount, out: &mut Vec<Primitive, N>) -> Result<(), PlanOverflow> {
    out.extend_from_slice(&[Primitive::Hold, Primitive::Turn(a), Primitive::Release])
        .map_err(|_| PlanOverflow)
}

/// One reorientation brings L to the bottom; three more bring it back
fn left<const N: usize>(a: Amount, out: &mut Vec<Primitive, N>) -> Result<(), PlanOverflow> {
    repeat(Primitive::Reorient, 1, out)?;
    bottom(a, out)?;
    repeat(Primitive::Reorient, 3, out)
}

/// Spin the target face round to L, turn it, spin back
fn bracket<const N: usize>(
    before: Amount,
    a: Amount,
    after: Amount,
    out: &mut Vec<Primitive, N>,
) -> Result<(), PlanOverflow> {
    repeat(Primitive::Turn(before), 1, out)?;
    left(a, out)?;
    repeat(Primitive::Turn(after), 1, out)
}

fn repeat<const N: usize>(
    p: Primitive,
    n: usize,
    out: &mut Vec<Primitive, N>,
) -> Result<(), PlanOverflow> {
    (0..n).try_for_each(|_| out.push(p).map_err(|_| PlanOverflow))
}
