use thiserror::Error;

use crate::lock::LockError;
use crate::questionnaire::StructureError;
use crate::store::{GatewayError, StoreError};

/// Fatal failure of a request. Validation and dynamic content problems never
/// surface here; they are recorded on the questionnaire or logged.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not logged in: missing {0}")]
    Unauthorized(&'static str),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error("questionnaire structure: {0}")]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Lock(#[from] LockError),
}

impl EngineError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            EngineError::Unauthorized(_) => 401,
            EngineError::Gateway(GatewayError::IdentityMismatch { .. }) => 403,
            EngineError::Gateway(GatewayError::TemplateMissing { .. }) => 404,
            EngineError::Gateway(GatewayError::Store(StoreError::InvalidKey(_))) => 400,
            EngineError::Gateway(_) => 500,
            EngineError::Structure(_) => 500,
            EngineError::Store(StoreError::InvalidKey(_)) => 400,
            EngineError::Store(_) => 500,
            EngineError::Lock(_) => 503,
        }
    }
}
