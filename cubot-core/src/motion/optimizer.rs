//! Plan optimizer
//!
//! Peephole pass over a primitive plan:
//! - four consecutive reorientations cancel
//! - adjacent turntable turns merge into one; a net full turn vanishes
//!
//! Hold and release are never moved, merged or dropped, so a turn never
//! crosses a change of lock state. The optimized plan leaves the cube, its
//! orientation and the lock state exactly as the unoptimized plan would.

use heapless::Vec;

use crate::cube::Amount;
use crate::kinematics::Primitive;

/// Reorientations in one full flip cycle
const REORIENT_CYCLE: usize = 4;

/// Optimize `plan` in place
pub fn optimize<const N: usize>(plan: &mut Vec<Primitive, N>) {
    let mut out: Vec<Primitive, N> = Vec::new();
    for &p in plan.iter() {
        match (out.last().copied(), p) {
            (Some(Primitive::Turn(a)), Primitive::Turn(b)) => {
                out.pop();
                if let Some(net) = Amount::from_quarters(a.quarters() + b.quarters()) {
                    // a slot was just freed
                    let _ = out.push(Primitive::Turn(net));
                }
            }
            (_, Primitive::Reorient) if trailing_reorients(&out) == REORIENT_CYCLE - 1 => {
                out.truncate(out.len() - (REORIENT_CYCLE - 1));
            }
            // out never grows past the input length
            _ => {
                let _ = out.push(p);
            }
        }
    }
    *plan = out;
}

fn trailing_reorients(plan: &[Primitive]) -> usize {
    plan.iter()
        .rev()
        .take_while(|&&p| p == Primitive::Reorient)
        .count()
}
