use std::sync::Arc;

use super::Lock;

/// Holds a lock until dropped.
pub struct LockGuard<L: Lock> {
    lock: Arc<L>,
}

impl<L: Lock> LockGuard<L> {
    pub(crate) fn new(lock: Arc<L>) -> Self {
        LockGuard { lock }
    }
}

impl<L: Lock> Drop for LockGuard<L> {
    fn drop(&mut self) {
        if let Err(err) = self.lock.unlock() {
            tracing::error!(error = %err, "releasing lock failed");
        }
    }
}
