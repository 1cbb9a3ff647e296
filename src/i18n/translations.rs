use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::format::fill_placeholders;

/// Marker returned when no translation exists, so gaps show up on screen.
pub const NO_TRANSLATION: &str = "multi_lang_map_not_initialized";

/// One text in several languages, keyed by language code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translations(BTreeMap<String, String>);

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, lang: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(lang.into(), text.into());
        self
    }

    pub fn set(&mut self, lang: impl Into<String>, text: impl Into<String>) {
        self.0.insert(lang.into(), text.into());
    }

    pub fn get(&self, lang: &str) -> Option<&str> {
        self.0.get(lang).map(String::as_str)
    }

    /// Looks up `lang`, then `default_lang`, then yields [`NO_TRANSLATION`].
    pub fn tr(&self, lang: &str, default_lang: &str) -> &str {
        self.get(lang)
            .or_else(|| self.get(default_lang))
            .unwrap_or(NO_TRANSLATION)
    }

    /// Like [`Translations::tr`] but yields `""` instead of the marker.
    pub fn tr_silent(&self, lang: &str, default_lang: &str) -> &str {
        match self.tr(lang, default_lang) {
            NO_TRANSLATION => "",
            s => s,
        }
    }

    /// Every translation in `lang_order`, placeholders filled with `args`,
    /// each followed by a blank line.
    pub fn all(&self, lang_order: &[String], args: &[&str]) -> String {
        let mut out = String::new();
        for lang in lang_order {
            if let Some(text) = self.get(lang) {
                out.push_str(&fill_placeholders(text, args));
                out.push_str("\n\n");
            }
        }
        out
    }

    /// Whether any language is present at all.
    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }

    /// Whether every present translation is empty.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    pub fn merge(&mut self, other: Translations) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Translations {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Translations(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
