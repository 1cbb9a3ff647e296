//! Per-key advisory locks.

mod error;
mod guard;
mod in_memory;
mod lock;
mod lock_manager;

pub use error::LockError;
pub use guard::LockGuard;
pub use in_memory::{InMemoryLock, InMemoryLockManager};
pub use lock::Lock;
pub use lock_manager::{respondent_key, LockManager};
