use super::LockError;

/// Advisory lock around one respondent's load, mutate and save pass.
///
/// Locks are handed out by a [`LockManager`](super::LockManager) and
/// released through the [`LockGuard`](super::LockGuard) it returns.
pub trait Lock: Send + Sync {
    /// Blocks until the lock is free, then takes it.
    fn lock(&self) -> Result<(), LockError>;

    /// Takes the lock if it is free. `Ok(false)` means someone else holds it.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Releases the lock and wakes one waiter. Releasing a free lock is a no-op.
    fn unlock(&self) -> Result<(), LockError>;

    /// Whether anyone holds or waits for the lock right now.
    fn in_use(&self) -> Result<bool, LockError>;
}
