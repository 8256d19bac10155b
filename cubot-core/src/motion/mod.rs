//! Move compilation
//!
//! Face moves are compiled into plans of rig primitives, and plans are
//! optimized by cancelling redundant motion.

pub mod compiler;
pub mod optimizer;

pub use compiler::{compile, compile_into, Plan, PlanOverflow, MAX_PLAN_LEN};
pub use optimizer::optimize;
