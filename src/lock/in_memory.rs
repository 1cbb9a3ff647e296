use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use super::{Lock, LockError, LockManager};

#[derive(Debug, Default)]
struct Occupancy {
    held: bool,
    waiting: usize,
}

/// Process-local lock. Counts its waiters so the manager can tell an idle
/// lock from one that is about to be taken.
#[derive(Debug, Default)]
pub struct InMemoryLock {
    occupancy: Mutex<Occupancy>,
    released: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        Self::default()
    }

    fn occupancy(&self) -> Result<MutexGuard<'_, Occupancy>, LockError> {
        self.occupancy
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut occ = self.occupancy()?;
        occ.waiting += 1;
        while occ.held {
            occ = self
                .released
                .wait(occ)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
        }
        occ.waiting -= 1;
        occ.held = true;
        Ok(())
    }

    fn try_lock(&self) -> Result<bool, LockError> {
        let mut occ = self.occupancy()?;
        let free = !occ.held;
        occ.held = true;
        Ok(free)
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut occ = self.occupancy()?;
        if occ.held {
            occ.held = false;
            if occ.waiting > 0 {
                self.released.notify_one();
            }
        }
        Ok(())
    }

    fn in_use(&self) -> Result<bool, LockError> {
        let occ = self.occupancy()?;
        Ok(occ.held || occ.waiting > 0)
    }
}

/// One [`InMemoryLock`] per respondent key.
///
/// Entries live only while someone holds or waits for them: every lookup
/// first drops the locks nobody references any more, so the map tracks the
/// respondents with a request in flight rather than every respondent seen.
#[derive(Debug, Default)]
pub struct InMemoryLockManager {
    locks: Mutex<HashMap<String, Arc<InMemoryLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.locks.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops idle locks. Returns how many were removed.
    pub fn prune(&self) -> Result<usize, LockError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))?;
        Ok(prune_idle(&mut locks))
    }
}

/// Runs with the map locked: a lock whose only reference is the map's own
/// cannot be handed out concurrently, so removing it is safe.
fn prune_idle(locks: &mut HashMap<String, Arc<InMemoryLock>>) -> usize {
    let before = locks.len();
    locks.retain(|_, lock| {
        Arc::strong_count(lock) > 1 || lock.in_use().unwrap_or(true)
    });
    let removed = before - locks.len();
    if removed > 0 {
        tracing::trace!(removed, remaining = locks.len(), "idle locks pruned");
    }
    removed
}

impl LockManager for InMemoryLockManager {
    type Lock = InMemoryLock;

    fn get_lock(&self, id: &str) -> Result<Arc<InMemoryLock>, LockError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))?;
        prune_idle(&mut locks);
        Ok(locks.entry(id.to_string()).or_default().clone())
    }
}
