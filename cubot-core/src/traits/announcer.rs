//! Solved announcement

/// Audible or visual notification that the cube is solved
///
/// Announcement is best-effort; implementations swallow their own errors.
#[allow(async_fn_in_trait)]
pub trait Announcer {
    async fn announce_solved(&mut self);
}
