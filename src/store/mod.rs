//! Persistence: the ephemeral session cache, the durable document store and
//! the gateway that loads and saves questionnaires across both.

mod error;
mod files;
mod gateway;
mod session;

pub use error::{GatewayError, StoreError};
pub use files::{DocumentKey, DocumentStore, FsDocumentStore, InMemoryDocumentStore};
pub use gateway::{decode_snapshot, encode_snapshot, LoadSource, PersistenceGateway};
pub use session::{
    InMemorySession, InMemorySessions, SessionStore, DEFAULT_IDLE_TIMEOUT, SLOT_LANG,
    SLOT_QUESTIONNAIRE,
};
