use std::sync::Arc;

use super::guard::LockGuard;
use super::{Lock, LockError};

/// Hands out one lock per key.
///
/// The engine serialises requests of the same respondent by locking
/// [`respondent_key`] around the whole load, mutate and save pass.
pub trait LockManager: Send + Sync {
    type Lock: Lock;

    /// Get (or create) the lock for `id`. Repeated calls with the same `id`
    /// must return the same logical lock.
    fn get_lock(&self, id: &str) -> Result<Arc<Self::Lock>, LockError>;

    /// Blocks until the lock for `id` is held; released when the guard drops.
    fn acquire(&self, id: &str) -> Result<LockGuard<Self::Lock>, LockError> {
        let lock = self.get_lock(id)?;
        lock.lock()?;
        Ok(LockGuard::new(lock))
    }
}

/// Lock key of one respondent in one wave.
pub fn respondent_key(survey_type: &str, wave_id: &str, user_id: &str) -> String {
    format!("{}/{}/{}", survey_type, wave_id, user_id)
}
