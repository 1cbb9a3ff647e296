use base64::{engine::general_purpose::STANDARD, Engine};

use crate::questionnaire::Questionnaire;

use super::error::{GatewayError, StoreError};
use super::files::{DocumentKey, DocumentStore};
use super::session::{SessionStore, SLOT_QUESTIONNAIRE};

/// Where a loaded questionnaire came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Session,
    Respondent,
    Template,
}

/// Encodes a questionnaire for the session slot (bitcode, base64).
pub fn encode_snapshot(q: &Questionnaire) -> Result<String, StoreError> {
    let bytes = bitcode::serialize(q).map_err(|e| StoreError::Encode(e.to_string()))?;
    Ok(STANDARD.encode(bytes))
}

pub fn decode_snapshot(encoded: &str) -> Result<Questionnaire, StoreError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| StoreError::Decode(e.to_string()))?;
    bitcode::deserialize(&bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Loads and saves questionnaires across the session cache and the durable
/// document store.
#[derive(Debug, Clone)]
pub struct PersistenceGateway<D> {
    documents: D,
}

impl<D: DocumentStore> PersistenceGateway<D> {
    pub fn new(documents: D) -> Self {
        PersistenceGateway { documents }
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    /// Resolves the questionnaire for `(survey_type, wave_id, user_id)`:
    /// session slot, then the respondent's document, then the survey template.
    ///
    /// Documents from the durable tiers are checked structurally and must
    /// carry the requested survey and wave. `curr_page` is clamped in every case.
    pub fn load(
        &self,
        session: &dyn SessionStore,
        survey_type: &str,
        wave_id: &str,
        user_id: &str,
    ) -> Result<(Questionnaire, LoadSource), GatewayError> {
        if let Some(mut q) = self.from_session(session, survey_type, wave_id, user_id)? {
            if q.clamp_curr_page() {
                tracing::warn!(user_id, "session questionnaire page out of range, reset");
            }
            tracing::info!(survey_type, wave_id, user_id, "questionnaire loaded from session");
            return Ok((q, LoadSource::Session));
        }

        let respondent = DocumentKey::respondent(survey_type, wave_id, user_id);
        let (data, key, source) = match self.documents.load(&respondent)? {
            Some(data) => (data, respondent, LoadSource::Respondent),
            None => {
                let template = DocumentKey::template(survey_type);
                match self.documents.load(&template)? {
                    Some(data) => (data, template, LoadSource::Template),
                    None => {
                        return Err(GatewayError::TemplateMissing {
                            survey: survey_type.to_string(),
                            location: self.documents.locate(&template),
                        })
                    }
                }
            }
        };

        let mut q: Questionnaire =
            serde_json::from_slice(&data).map_err(|e| GatewayError::Malformed {
                location: self.documents.locate(&key),
                reason: e.to_string(),
            })?;
        q.validate_structure()?;
        if q.survey_type() != survey_type || q.wave_id() != wave_id {
            return Err(GatewayError::IdentityMismatch {
                survey: survey_type.to_string(),
                wave: wave_id.to_string(),
                found_survey: q.survey_type().to_string(),
                found_wave: q.wave_id().to_string(),
            });
        }
        q.user_id = user_id.to_string();
        if q.clamp_curr_page() {
            tracing::warn!(user_id, "stored page out of range, reset to 0");
        }
        tracing::info!(location = %self.documents.locate(&key), ?source, "questionnaire loaded");
        Ok((q, source))
    }

    fn from_session(
        &self,
        session: &dyn SessionStore,
        survey_type: &str,
        wave_id: &str,
        user_id: &str,
    ) -> Result<Option<Questionnaire>, GatewayError> {
        let Some(encoded) = session.get(SLOT_QUESTIONNAIRE)? else {
            return Ok(None);
        };
        let q = match decode_snapshot(&encoded) {
            Ok(q) => q,
            Err(err) => {
                tracing::warn!(error = %err, "unreadable session questionnaire ignored");
                return Ok(None);
            }
        };
        if q.survey_type() != survey_type || q.wave_id() != wave_id || q.user_id != user_id {
            tracing::warn!(
                cached = %format!("{}/{}/{}", q.survey_type(), q.wave_id(), q.user_id),
                requested = %format!("{}/{}/{}", survey_type, wave_id, user_id),
                "session questionnaire belongs to another identity, ignored"
            );
            return Ok(None);
        }
        Ok(Some(q))
    }

    /// Writes `q` to the respondent's document, then to the session slot.
    ///
    /// The session only ever caches a state the durable tier holds too. If
    /// the document write fails the session keeps its previous snapshot; if
    /// the session write fails the slot is cleared so the next load goes to
    /// the document.
    pub fn save(&self, session: &dyn SessionStore, q: &Questionnaire) -> Result<(), GatewayError> {
        let encoded = encode_snapshot(q)?;
        let key = DocumentKey::respondent(q.survey_type(), q.wave_id(), q.user_id.as_str());
        let json = serde_json::to_vec_pretty(q).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.documents.save(&key, &json)?;

        if let Err(err) = session.put(SLOT_QUESTIONNAIRE, encoded) {
            tracing::warn!(error = %err, "session write failed, dropping cached questionnaire");
            if let Err(cleanup) = session.remove(SLOT_QUESTIONNAIRE) {
                tracing::error!(error = %cleanup, "clearing session slot failed");
            }
            return Err(err.into());
        }
        tracing::info!(location = %self.documents.locate(&key), curr_page = q.curr_page, "questionnaire saved");
        Ok(())
    }

    /// Drops the cached questionnaire, e.g. on a fresh login.
    pub fn forget_session(&self, session: &dyn SessionStore) -> Result<bool, GatewayError> {
        Ok(session.remove(SLOT_QUESTIONNAIRE)?)
    }
}
