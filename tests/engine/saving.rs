use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use quest_engine::store::{GatewayError, LoadSource};
use quest_engine::{
    DocumentKey, DocumentStore, Engine, EngineError, InMemoryDocumentStore, InMemorySession,
    QuestRequest, StoreError,
};

use crate::support::{catalog, input, next, Harness, SURVEY, USER, WAVE};

/// Document store whose writes can be switched off.
#[derive(Clone)]
struct Switchable {
    inner: InMemoryDocumentStore,
    broken: Arc<AtomicBool>,
}

impl DocumentStore for Switchable {
    fn load(&self, key: &DocumentKey) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.load(key)
    }

    fn save(&self, key: &DocumentKey, data: &[u8]) -> Result<(), StoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: key.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        self.inner.save(key, data)
    }
}

fn switchable_engine() -> (Engine<Switchable>, Switchable) {
    let h = Harness::new();
    let docs = Switchable {
        inner: h.docs.clone(),
        broken: Arc::new(AtomicBool::new(false)),
    };
    let engine = Engine::new(docs.clone(), catalog()).with_clock(h.clock.clone());
    (engine, docs)
}

#[test]
fn failed_durable_write_persists_nothing() {
    let (engine, docs) = switchable_engine();
    let session = InMemorySession::new();
    let identity = Harness::new().identity();
    docs.broken.store(true, Ordering::SeqCst);

    let err = engine
        .handle(&identity, &session, &next().param("name", "Ada"))
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Gateway(GatewayError::Store(StoreError::Io { .. }))
    ));
    assert_eq!(err.status_code(), 500);

    let (q, source) = engine.gateway().load(&session, SURVEY, WAVE, USER).unwrap();
    assert_eq!(source, LoadSource::Template);
    assert_eq!(q.curr_page, 0);
    assert_eq!(input(&q, "name").response, "");
}

#[test]
fn failed_durable_write_keeps_last_completed_state() {
    let (engine, docs) = switchable_engine();
    let session = InMemorySession::new();
    let identity = Harness::new().identity();

    engine
        .handle(&identity, &session, &next().param("name", "Ada"))
        .unwrap();

    docs.broken.store(true, Ordering::SeqCst);
    assert!(engine
        .handle(&identity, &session, &next().param("satisfied", "2"))
        .is_err());

    docs.broken.store(false, Ordering::SeqCst);
    let outcome = engine
        .handle(&identity, &session, &QuestRequest::new())
        .unwrap();
    let q = outcome.questionnaire().unwrap();
    assert_eq!(q.curr_page, 1);
    assert_eq!(input(q, "name").response, "Ada");
    assert_eq!(input(q, "satisfied").response, "0");
}
