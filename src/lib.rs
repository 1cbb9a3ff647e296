pub mod clock;
pub mod config;
pub mod dynamic;
pub mod engine;
pub mod i18n;
pub mod lock;
pub mod logging;
pub mod questionnaire;
pub mod store;
pub mod validation;

#[cfg(feature = "http")]
pub mod http;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{AppConfig, ConfigError};
pub use dynamic::{DynamicError, DynamicRegistry};
pub use engine::{Engine, EngineError, Identity, Outcome, QuestRequest};
pub use i18n::{Catalog, Translations};
pub use lock::{InMemoryLockManager, LockError, LockManager};
pub use questionnaire::{
    DevicePreference, Group, Input, InputType, LanguageError, Page, Questionnaire,
    StructureError, Survey,
};
pub use store::{
    DocumentKey, DocumentStore, FsDocumentStore, GatewayError, InMemoryDocumentStore,
    InMemorySession, InMemorySessions, PersistenceGateway, SessionStore, StoreError,
};
pub use validation::{RuleError, ValidatorRegistry};
