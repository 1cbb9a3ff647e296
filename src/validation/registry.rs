use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::i18n::Catalog;
use crate::questionnaire::{Questionnaire, VAL_EMPTY};

use super::numeric::check_range;

/// A rule rejected a value. The message is already localized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleError {
    message: String,
}

impl RuleError {
    pub fn new(message: impl Into<String>) -> Self {
        RuleError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A validation rule: `(lang_code, raw_value) -> Ok | localized error`.
pub type Rule = Arc<dyn Fn(&str, &str) -> Result<(), RuleError> + Send + Sync>;

/// Symmetric bounds of the built-in `inRange*` rules.
pub const RANGE_RULES: &[(&str, f64)] = &[
    ("inRange10", 10.0),
    ("inRange20", 20.0),
    ("inRange100", 100.0),
    ("inRange1000", 1_000.0),
    ("inRange10000", 10_000.0),
    ("inRange50000", 50_000.0),
    ("inRange1Mio", 1_000_000.0),
];

/// Named validation rules, built once at startup and shared by the engine.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    rules: HashMap<String, Rule>,
}

impl ValidatorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `must`, `mustRadioGroup` and every `inRange*` rule,
    /// with messages taken from `catalog`.
    pub fn with_builtins(catalog: Arc<Catalog>) -> Self {
        let mut registry = Self::new();

        let c = catalog.clone();
        registry.register("must", move |lang, arg| {
            if arg.trim().is_empty() {
                return Err(RuleError::new(c.tr("must_not_empty", lang)));
            }
            Ok(())
        });

        let c = catalog.clone();
        registry.register("mustRadioGroup", move |lang, arg| {
            if arg == VAL_EMPTY || arg.is_empty() {
                return Err(RuleError::new(c.tr("must_one_option", lang)));
            }
            Ok(())
        });

        for (name, limit) in RANGE_RULES {
            let c = catalog.clone();
            let limit = *limit;
            registry.register(*name, move |lang, arg| check_range(&c, lang, arg, limit));
        }

        registry
    }

    /// Register a rule, replacing any rule of the same name. Builder style.
    pub fn rule<F>(mut self, name: &str, rule: F) -> Self
    where
        F: Fn(&str, &str) -> Result<(), RuleError> + Send + Sync + 'static,
    {
        self.register(name, rule);
        self
    }

    pub fn register<F>(&mut self, name: &str, rule: F)
    where
        F: Fn(&str, &str) -> Result<(), RuleError> + Send + Sync + 'static,
    {
        self.rules.insert(name.to_string(), Arc::new(rule));
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name.trim())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs every rule of every non-layout input on page `page_idx`.
    ///
    /// An input with rules has its error cleared first; each failing rule then
    /// overwrites it, so the last failure in list order is kept. Inputs on
    /// other pages keep whatever error they had. Sets `has_errors` and
    /// returns the last failure seen on the page.
    pub fn validate_page(
        &self,
        q: &mut Questionnaire,
        page_idx: usize,
        lang: &str,
    ) -> Option<RuleError> {
        let Some(page) = q.pages.get_mut(page_idx) else {
            return None;
        };

        let mut last = None;
        for inp in page.inputs_mut() {
            if inp.is_layout() || inp.validators.is_empty() {
                continue;
            }
            inp.err_msg = None;
            for name in &inp.validators {
                let Some(rule) = self.get(name) else {
                    tracing::warn!(input = %inp.name, rule = %name, "unknown validation rule skipped");
                    continue;
                };
                if let Err(err) = rule(lang, &inp.response) {
                    tracing::debug!(input = %inp.name, rule = %name, error = %err, "validation failed");
                    inp.err_msg = Some(err.message().to_string());
                    last = Some(err);
                }
            }
        }

        q.has_errors = q.pages[page_idx].inputs().any(|inp| inp.has_error());
        last
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("rules", &self.names())
            .finish()
    }
}
