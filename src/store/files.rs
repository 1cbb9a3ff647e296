use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::error::StoreError;

/// Address of a durable questionnaire document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    /// One respondent's progress in one wave.
    Respondent {
        survey_type: String,
        wave_id: String,
        user_id: String,
    },
    /// The blank questionnaire of a survey type.
    Template { survey_type: String },
}

impl DocumentKey {
    pub fn respondent(
        survey_type: impl Into<String>,
        wave_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        DocumentKey::Respondent {
            survey_type: survey_type.into(),
            wave_id: wave_id.into(),
            user_id: user_id.into(),
        }
    }

    pub fn template(survey_type: impl Into<String>) -> Self {
        DocumentKey::Template {
            survey_type: survey_type.into(),
        }
    }

    /// Path relative to the store root:
    /// `<survey>/<wave>/<user>.json` or `<survey>.json`.
    pub fn relative_path(&self) -> Result<PathBuf, StoreError> {
        match self {
            DocumentKey::Respondent {
                survey_type,
                wave_id,
                user_id,
            } => {
                let mut path = PathBuf::from(segment(survey_type)?);
                path.push(segment(wave_id)?);
                path.push(format!("{}.json", segment(user_id)?));
                Ok(path)
            }
            DocumentKey::Template { survey_type } => {
                Ok(PathBuf::from(format!("{}.json", segment(survey_type)?)))
            }
        }
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKey::Respondent {
                survey_type,
                wave_id,
                user_id,
            } => write!(f, "{}/{}/{}", survey_type, wave_id, user_id),
            DocumentKey::Template { survey_type } => write!(f, "template {}", survey_type),
        }
    }
}

fn segment(s: &str) -> Result<&str, StoreError> {
    if s.is_empty() || s == "." || s == ".." || s.contains(['/', '\\']) || s.contains('\0') {
        return Err(StoreError::InvalidKey(s.to_string()));
    }
    Ok(s)
}

/// Durable byte store for serialized questionnaires.
pub trait DocumentStore: Send + Sync {
    /// The document at `key`, or `None` if it was never written.
    fn load(&self, key: &DocumentKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Writes `data` at `key`, replacing any previous document.
    fn save(&self, key: &DocumentKey, data: &[u8]) -> Result<(), StoreError>;

    /// Human-readable location of `key`, for logs and errors.
    fn locate(&self, key: &DocumentKey) -> String {
        match key.relative_path() {
            Ok(path) => path.display().to_string(),
            Err(_) => key.to_string(),
        }
    }
}

/// Documents as JSON files below a root directory.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsDocumentStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, key: &DocumentKey) -> Result<PathBuf, StoreError> {
        Ok(self.root.join(key.relative_path()?))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, key: &DocumentKey) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_of(key)?;
        match std::fs::read(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn save(&self, key: &DocumentKey, data: &[u8]) -> Result<(), StoreError> {
        let path = self.path_of(key)?;
        let dir = path.parent().unwrap_or(&self.root);
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;

        // written next to the target and renamed over it, so readers see
        // either the previous document or the new one
        let mut tmp = tempfile::Builder::new()
            .prefix(".quest-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| io_error(dir, e))?;
        tmp.write_all(data).map_err(|e| io_error(tmp.path(), e))?;
        tmp.as_file().sync_all().map_err(|e| io_error(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| io_error(&path, e.error))?;
        Ok(())
    }

    fn locate(&self, key: &DocumentKey) -> String {
        match self.path_of(key) {
            Ok(path) => path.display().to_string(),
            Err(_) => key.to_string(),
        }
    }
}

/// In-memory document store backed by `Arc<RwLock<HashMap>>`.
///
/// Clone-friendly (cloning shares the same underlying storage).
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<PathBuf, Vec<u8>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &DocumentKey) -> Result<bool, StoreError> {
        let path = key.relative_path()?;
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::LockPoisoned("document read"))?;
        Ok(documents.contains_key(&path))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn load(&self, key: &DocumentKey) -> Result<Option<Vec<u8>>, StoreError> {
        let path = key.relative_path()?;
        let documents = self
            .documents
            .read()
            .map_err(|_| StoreError::LockPoisoned("document read"))?;
        Ok(documents.get(&path).cloned())
    }

    fn save(&self, key: &DocumentKey, data: &[u8]) -> Result<(), StoreError> {
        let path = key.relative_path()?;
        let mut documents = self
            .documents
            .write()
            .map_err(|_| StoreError::LockPoisoned("document write"))?;
        documents.insert(path, data.to_vec());
        Ok(())
    }
}
