use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The underlying primitive was poisoned by a panicking holder.
    #[error("lock poisoned: {0}")]
    Poisoned(String),
    #[error("lock acquire failed: {0}")]
    AcquireFailed(String),
    #[error("lock release failed: {0}")]
    ReleaseFailed(String),
}
