/// Errors returned when window inputs violate a precondition.
///
/// These are integration bugs on the caller's side, never runtime conditions: the window is
/// not computed rather than guessing a replacement value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Rows must have a positive size in the scroll axis.
    #[error("item size must be greater than zero")]
    ZeroItemSize,
}
