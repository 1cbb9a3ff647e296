use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use super::format::fill_placeholders;
use super::translations::{Translations, NO_TRANSLATION};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading translations from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing translations: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application-wide translation store: key → text in every language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lang_codes: Vec<String>,
    entries: BTreeMap<String, Translations>,
}

impl Catalog {
    pub fn new(lang_codes: Vec<String>) -> Self {
        Catalog {
            lang_codes,
            entries: BTreeMap::new(),
        }
    }

    /// Catalog pre-filled with the messages the engine and built-in rules use.
    pub fn builtin(lang_codes: Vec<String>) -> Self {
        let mut catalog = Self::new(lang_codes);
        for (key, de, en) in BUILTIN {
            catalog.insert(*key, Translations::new().with("de", *de).with("en", *en));
        }
        catalog
    }

    /// Merges entries from a TOML document shaped `[key] lang = "text"`.
    /// Existing languages of an entry are overwritten, others are kept.
    pub fn merge_toml(&mut self, src: &str) -> Result<(), CatalogError> {
        let parsed: BTreeMap<String, Translations> = toml::from_str(src)?;
        for (key, translations) in parsed {
            self.entries.entry(key).or_default().merge(translations);
        }
        Ok(())
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<(), CatalogError> {
        let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.merge_toml(&src)
    }

    pub fn insert(&mut self, key: impl Into<String>, translations: Translations) {
        self.entries.insert(key.into(), translations);
    }

    pub fn lang_codes(&self) -> &[String] {
        &self.lang_codes
    }

    pub fn default_lang(&self) -> &str {
        self.lang_codes.first().map(String::as_str).unwrap_or("en")
    }

    pub fn get(&self, key: &str) -> Option<&Translations> {
        self.entries.get(key)
    }

    /// Text for `key` in `lang`, falling back to the default language.
    pub fn tr(&self, key: &str, lang: &str) -> &str {
        match self.entries.get(key) {
            Some(t) => t.tr(lang, self.default_lang()),
            None => NO_TRANSLATION,
        }
    }

    /// `tr` with placeholders filled.
    pub fn trf(&self, key: &str, lang: &str, args: &[&str]) -> String {
        fill_placeholders(self.tr(key, lang), args)
    }

    /// Every configured language, placeholders filled, blank-line separated.
    pub fn all(&self, key: &str, args: &[&str]) -> String {
        match self.entries.get(key) {
            Some(t) => t.all(&self.lang_codes, args),
            None => NO_TRANSLATION.to_string(),
        }
    }
}

const BUILTIN: &[(&str, &str, &str)] = &[
    (
        "must_not_empty",
        "Bitte füllen Sie dieses Feld aus.",
        "Please fill in this field.",
    ),
    (
        "must_one_option",
        "Bitte wählen Sie eine Option.",
        "Please choose one option.",
    ),
    (
        "not_a_number",
        "'%v' ist keine Zahl.",
        "'%v' is not a number.",
    ),
    (
        "too_big",
        "Maximal %v erlaubt.",
        "Max %v allowed.",
    ),
    (
        "too_small",
        "Minimal %v erlaubt.",
        "Min %v allowed.",
    ),
    (
        "finished_by_participant",
        "Sie haben diese Umfrage am %v abgeschlossen. Vielen Dank.",
        "You finished this survey at %v. Thank you.",
    ),
    (
        "deadline_exceeded",
        "Die Umfrage wurde am %v beendet.",
        "The survey closed at %v.",
    ),
    (
        "review_by_personal_link",
        "Sie können Ihre Antworten über Ihren persönlichen Link bis zum Ende der Umfrage überarbeiten.",
        "You may revise your answers via your personal link until the survey ends.",
    ),
    (
        "percentage_answered",
        "Sie haben %v von %v Fragen beantwortet: %v Prozent. <br>",
        "You answered %v out of %v questions: %v percent. <br>",
    ),
    (
        "survey_ending",
        "Die Umfrage endet am %v. Ergebnisse ab %v. <br>",
        "Survey will end on %v. Results available from %v. <br>",
    ),
    (
        "login_failed",
        "Anmeldung fehlgeschlagen.",
        "Login failed.",
    ),
    (
        "request_failed",
        "Ihre Anfrage konnte nicht bearbeitet werden.",
        "Your request could not be processed.",
    ),
];
