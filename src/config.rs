//! Application configuration, read from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::{Catalog, CatalogError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config lists no languages")]
    NoLanguages,
    #[error(transparent)]
    Translations(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application languages, most preferred first.
    pub lang_codes: Vec<String>,
    /// Root of the durable questionnaire store.
    pub data_dir: PathBuf,
    /// Prefix of static asset URLs.
    pub url_path_prefix: String,
    pub bind_addr: String,
    /// Browser sessions unused for this long are dropped.
    pub session_idle_minutes: u64,
    /// Extra or overriding catalog entries.
    pub translations: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            lang_codes: vec!["de".into(), "en".into()],
            data_dir: PathBuf::from("data"),
            url_path_prefix: String::new(),
            bind_addr: "127.0.0.1:8081".into(),
            session_idle_minutes: 120,
            translations: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut cfg = Self::from_toml_str(&content)?;
        // relative paths are taken from the config file's directory
        if let Some(base) = path.parent() {
            if cfg.data_dir.is_relative() {
                cfg.data_dir = base.join(&cfg.data_dir);
            }
            if let Some(tr) = cfg.translations.as_mut() {
                if tr.is_relative() {
                    *tr = base.join(&*tr);
                }
            }
        }
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = toml::from_str(s)?;
        if cfg.lang_codes.is_empty() {
            return Err(ConfigError::NoLanguages);
        }
        Ok(cfg)
    }

    /// The first configured language.
    pub fn default_lang(&self) -> &str {
        self.lang_codes.first().map(String::as_str).unwrap_or("en")
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.saturating_mul(60))
    }

    /// Built-in messages, overlaid with the configured translations file.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let mut catalog = Catalog::builtin(self.lang_codes.clone());
        if let Some(path) = &self.translations {
            catalog.merge_file(path)?;
            tracing::info!(path = %path.display(), "translations merged");
        }
        Ok(catalog)
    }
}
