/// Precondition violations rejected by [`crate::ListMembershipTracker::update`].
///
/// A rejected update leaves the tracker untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PresenceError {
    /// Two items of one snapshot produced the same key. `index` is the position of the
    /// second occurrence.
    #[error("duplicate key at index {index} of the target collection")]
    DuplicateKey { index: usize },
    #[error("exit duration must be greater than zero")]
    ZeroExitDuration,
    #[error("tracker has been disposed")]
    Disposed,
}
