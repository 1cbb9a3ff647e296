use thiserror::Error;

use crate::questionnaire::StructureError;

/// Failure of a single store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid key segment '{0}'")]
    InvalidKey(String),
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("i/o on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("encoding snapshot: {0}")]
    Encode(String),
    #[error("decoding snapshot: {0}")]
    Decode(String),
}

/// Failure to load or save a questionnaire. Always fatal to the request.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no template for survey '{survey}' at {location}")]
    TemplateMissing { survey: String, location: String },
    #[error("questionnaire is {found_survey}/{found_wave}, requested {survey}/{wave}")]
    IdentityMismatch {
        survey: String,
        wave: String,
        found_survey: String,
        found_wave: String,
    },
    #[error("malformed snapshot at {location}: {reason}")]
    Malformed { location: String, reason: String },
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
