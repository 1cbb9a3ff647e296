use crate::questionnaire::Questionnaire;
use crate::store::{SessionStore, StoreError, SLOT_LANG};

use super::request::{Identity, QuestRequest, PARAM_LANG};

/// Picks the questionnaire language, first acceptable wins:
/// request parameter, the questionnaire's own, the session's, the
/// identity's, the first application language. The result is remembered
/// in the session.
pub(crate) fn resolve_language(
    q: &mut Questionnaire,
    req: &QuestRequest,
    session: &dyn SessionStore,
    identity: &Identity,
    app_langs: &[String],
) -> Result<(), StoreError> {
    if let Some(code) = req.get(PARAM_LANG) {
        match q.set_lang_code(code, app_langs) {
            Ok(()) => tracing::info!(lang = code, "language set by request"),
            Err(err) => tracing::warn!(lang = code, error = %err, "requested language rejected"),
        }
    }

    if q.lang_code.is_empty() {
        if let Some(code) = session.get(SLOT_LANG)? {
            try_set(q, &code, app_langs, "session");
        }
    }
    if q.lang_code.is_empty() {
        if let Some(code) = identity.lang_code.as_deref() {
            try_set(q, code, app_langs, "identity");
        }
    }
    if q.lang_code.is_empty() {
        let first = app_langs.first().or_else(|| q.lang_codes.first()).cloned();
        if let Some(code) = first {
            try_set(q, &code, app_langs, "default");
        }
    }

    if !q.lang_code.is_empty() {
        session.put(SLOT_LANG, q.lang_code.clone())?;
    }
    Ok(())
}

fn try_set(q: &mut Questionnaire, code: &str, app_langs: &[String], from: &'static str) {
    match q.set_lang_code(code, app_langs) {
        Ok(()) => tracing::debug!(lang = code, from, "language resolved"),
        Err(err) => tracing::warn!(lang = code, from, error = %err, "language rejected"),
    }
}
