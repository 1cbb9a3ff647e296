use std::sync::Arc;

use chrono::SubsecRound;

use crate::clock::{Clock, SystemClock};
use crate::config::{AppConfig, ConfigError};
use crate::dynamic::{DynamicRegistry, DATE_TIME_FORMAT};
use crate::i18n::Catalog;
use crate::lock::{respondent_key, InMemoryLockManager, LockManager};
use crate::questionnaire::{Questionnaire, VAL_SET};
use crate::store::{DocumentStore, FsDocumentStore, PersistenceGateway, SessionStore};
use crate::validation::ValidatorRegistry;

use super::capture::capture_page;
use super::device::resolve_device;
use super::error::EngineError;
use super::language::resolve_language;
use super::navigation::Intent;
use super::outcome::Outcome;
use super::request::{Identity, QuestRequest, PARAM_FINISHED};

/// Navigation & capture engine.
///
/// Owns the registries, the persistence gateway and the per-respondent
/// locks. One call to [`Engine::handle`] is one request.
///
/// ## Example
///
/// ```ignore
/// let catalog = Arc::new(Catalog::builtin(vec!["de".into(), "en".into()]));
/// let engine = Engine::new(FsDocumentStore::new("data"), catalog);
///
/// let outcome = engine.handle(&identity, &session, &request)?;
/// ```
pub struct Engine<D, M = InMemoryLockManager> {
    gateway: PersistenceGateway<D>,
    catalog: Arc<Catalog>,
    validators: ValidatorRegistry,
    dynamic: DynamicRegistry,
    clock: Arc<dyn Clock>,
    locks: M,
    lang_codes: Vec<String>,
}

impl<D: DocumentStore> Engine<D> {
    /// Engine with the built-in rules and content producers, the system
    /// clock and in-memory locks. Languages come from the catalog.
    pub fn new(documents: D, catalog: Arc<Catalog>) -> Self {
        Engine {
            gateway: PersistenceGateway::new(documents),
            validators: ValidatorRegistry::with_builtins(catalog.clone()),
            dynamic: DynamicRegistry::with_builtins(catalog.clone(), ""),
            clock: Arc::new(SystemClock),
            locks: InMemoryLockManager::new(),
            lang_codes: catalog.lang_codes().to_vec(),
            catalog,
        }
    }
}

impl Engine<FsDocumentStore> {
    /// Engine over `cfg.data_dir` with the configured languages and translations.
    pub fn from_config(cfg: &AppConfig) -> Result<Self, ConfigError> {
        let catalog = Arc::new(cfg.catalog()?);
        let engine = Engine::new(FsDocumentStore::new(&cfg.data_dir), catalog.clone())
            .with_dynamic(DynamicRegistry::with_builtins(
                catalog,
                cfg.url_path_prefix.clone(),
            ));
        Ok(engine)
    }
}

impl<D: DocumentStore, M: LockManager> Engine<D, M> {
    pub fn with_validators(mut self, validators: ValidatorRegistry) -> Self {
        self.validators = validators;
        self
    }

    pub fn with_dynamic(mut self, dynamic: DynamicRegistry) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_lang_codes(mut self, lang_codes: Vec<String>) -> Self {
        self.lang_codes = lang_codes;
        self
    }

    pub fn with_locks<M2: LockManager>(self, locks: M2) -> Engine<D, M2> {
        Engine {
            gateway: self.gateway,
            catalog: self.catalog,
            validators: self.validators,
            dynamic: self.dynamic,
            clock: self.clock,
            locks,
            lang_codes: self.lang_codes,
        }
    }

    pub fn gateway(&self) -> &PersistenceGateway<D> {
        &self.gateway
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn validators(&self) -> &ValidatorRegistry {
        &self.validators
    }

    pub fn dynamic(&self) -> &DynamicRegistry {
        &self.dynamic
    }

    pub fn lang_codes(&self) -> &[String] {
        &self.lang_codes
    }

    pub fn locks(&self) -> &M {
        &self.locks
    }

    /// A fresh login: forget whatever questionnaire the session still caches.
    pub fn on_login(&self, session: &dyn SessionStore) -> Result<(), EngineError> {
        if self.gateway.forget_session(session)? {
            tracing::info!("cached questionnaire dropped on login");
        }
        Ok(())
    }

    /// Runs one request for `identity` under the respondent's lock.
    ///
    /// A closed or expired questionnaire short-circuits into a banner and is
    /// neither mutated nor saved. Otherwise the posted values land on the page
    /// the respondent was on, that page is validated, and the questionnaire
    /// moves to the requested page only if the page is free of errors.
    pub fn handle(
        &self,
        identity: &Identity,
        session: &dyn SessionStore,
        req: &QuestRequest,
    ) -> Result<Outcome, EngineError> {
        if let Some(field) = identity.missing_field() {
            return Err(EngineError::Unauthorized(field));
        }
        let key = respondent_key(&identity.survey_type, &identity.wave_id, &identity.user_id);
        let _guard = self.locks.acquire(&key)?;

        let (mut q, source) = self.gateway.load(
            session,
            &identity.survey_type,
            &identity.wave_id,
            &identity.user_id,
        )?;
        q.resolve_references(
            |rule| self.validators.contains(rule),
            |content| self.dynamic.contains(content),
        )?;
        tracing::debug!(%key, ?source, curr_page = q.curr_page, "request started");

        let now = self.clock.now();
        if let Some(closed_at) = q.closing_time {
            tracing::info!(%key, %closed_at, "questionnaire already closed");
            let at = closed_at.format(DATE_TIME_FORMAT).to_string();
            return Ok(Outcome::Closed {
                banner: self.catalog.all("finished_by_participant", &[&at]),
            });
        }
        if q.deadline_passed(now) {
            tracing::info!(%key, deadline = %q.survey.deadline, "survey deadline passed");
            let at = q.survey.deadline.format(DATE_TIME_FORMAT).to_string();
            return Ok(Outcome::DeadlineExceeded {
                banner: self.catalog.all("deadline_exceeded", &[&at]),
            });
        }

        resolve_language(&mut q, req, session, identity, &self.lang_codes)?;
        q.attrs = identity.attrs.clone();

        let prev_page = q.curr_page;
        let intent = Intent::from_request(req);
        q.curr_page = intent.target(&q);
        tracing::info!(%key, ?intent, from = prev_page, to = q.curr_page, "page transition requested");

        capture_page(&mut q, prev_page, req);
        let stamp = now.trunc_subsecs(0);
        if let Some(page) = q.pages.get_mut(prev_page) {
            page.mark_finished(stamp);
        }

        let lang = q.lang_code.clone();
        self.validators.validate_page(&mut q, prev_page, &lang);
        if q.has_errors {
            for (page, input, msg) in q.error_messages() {
                tracing::debug!(page, input, msg, "validation error");
            }
            q.curr_page = prev_page;
            tracing::info!(%key, page = prev_page, "page has errors, staying");
        }

        if !req.remote_addr.is_empty() {
            q.remote_ip = req.remote_addr.clone();
        }
        q.user_agent = req.user_agent.clone();
        let mobile = resolve_device(&mut q, req);

        if req.get(PARAM_FINISHED) == Some(VAL_SET) {
            close(&mut q, stamp);
        }

        let curr = q.curr_page;
        self.dynamic.compute_page(&mut q, curr);

        self.gateway.save(session, &q)?;
        Ok(Outcome::Render {
            questionnaire: Box::new(q),
            mobile,
        })
    }
}

/// Stamps the closing time once; later submissions keep the first stamp.
fn close(q: &mut Questionnaire, at: chrono::DateTime<chrono::Utc>) {
    match q.closing_time {
        Some(first) => tracing::debug!(%first, "questionnaire already closed, stamp kept"),
        None => {
            q.closing_time = Some(at);
            tracing::info!(user_id = %q.user_id, %at, "questionnaire closed by respondent");
        }
    }
}

impl<D, M> std::fmt::Debug for Engine<D, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("validators", &self.validators)
            .field("dynamic", &self.dynamic)
            .field("lang_codes", &self.lang_codes)
            .finish()
    }
}
