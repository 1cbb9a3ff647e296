use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

use super::error::StoreError;

/// Slot holding the encoded questionnaire of the preceding request.
pub const SLOT_QUESTIONNAIRE: &str = "questionnaire";
/// Slot holding the language the respondent last used.
pub const SLOT_LANG: &str = "lang_code";

/// Ephemeral per-browser key/value store.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removes `key`. Returns true if it was present.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// One browser session held in memory.
///
/// Clone-friendly (cloning shares the same underlying storage).
#[derive(Clone, Default)]
pub struct InMemorySession {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::LockPoisoned("session read"))?;
        let mut keys: Vec<String> = values.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

impl SessionStore for InMemorySession {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .read()
            .map_err(|_| StoreError::LockPoisoned("session read"))?;
        Ok(values.get(key).cloned())
    }

    fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::LockPoisoned("session write"))?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut values = self
            .values
            .write()
            .map_err(|_| StoreError::LockPoisoned("session write"))?;
        Ok(values.remove(key).is_some())
    }
}

/// Sessions idle longer than this are dropped by default.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

struct Tracked {
    session: InMemorySession,
    last_seen: Instant,
}

struct Registry {
    sessions: HashMap<String, Tracked>,
    last_sweep: Instant,
}

/// All live browser sessions, keyed by session id.
///
/// A session that has not been asked for within the idle timeout expires.
/// Expired sessions are swept lazily while other sessions are looked up.
#[derive(Clone)]
pub struct InMemorySessions {
    registry: Arc<Mutex<Registry>>,
    idle_timeout: Duration,
}

impl Default for InMemorySessions {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl InMemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        InMemorySessions {
            registry: Arc::new(Mutex::new(Registry {
                sessions: HashMap::new(),
                last_sweep: Instant::now(),
            })),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    fn registry(&self) -> Result<MutexGuard<'_, Registry>, StoreError> {
        self.registry
            .lock()
            .map_err(|_| StoreError::LockPoisoned("sessions"))
    }

    /// The session for `id`, created empty on first use or after it expired.
    pub fn session(&self, id: &str) -> Result<InMemorySession, StoreError> {
        let now = Instant::now();
        let mut registry = self.registry()?;
        if now.duration_since(registry.last_sweep) >= self.idle_timeout / 4 {
            sweep(&mut registry, now, self.idle_timeout);
        }
        let tracked = registry.sessions.entry(id.to_string()).or_insert_with(|| Tracked {
            session: InMemorySession::new(),
            last_seen: now,
        });
        if now.duration_since(tracked.last_seen) > self.idle_timeout {
            tracing::debug!("session expired, starting afresh");
            tracked.session = InMemorySession::new();
        }
        tracked.last_seen = now;
        Ok(tracked.session.clone())
    }

    /// Drops every session idle longer than the timeout. Returns how many went.
    pub fn evict_idle(&self) -> Result<usize, StoreError> {
        let mut registry = self.registry()?;
        Ok(sweep(&mut registry, Instant::now(), self.idle_timeout))
    }

    /// Drops the session for `id`. Returns true if it existed.
    pub fn end(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.registry()?.sessions.remove(id).is_some())
    }

    pub fn len(&self) -> usize {
        self.registry().map(|r| r.sessions.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn sweep(registry: &mut Registry, now: Instant, idle_timeout: Duration) -> usize {
    let before = registry.sessions.len();
    registry
        .sessions
        .retain(|_, t| now.duration_since(t.last_seen) <= idle_timeout);
    registry.last_sweep = now;
    let evicted = before - registry.sessions.len();
    if evicted > 0 {
        tracing::info!(evicted, live = registry.sessions.len(), "idle sessions evicted");
    }
    evicted
}
