use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::i18n::Catalog;
use crate::questionnaire::{InputType, Questionnaire};

use super::builtin;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DynamicError {
    #[error("missing respondent attribute(s): {}", .0.join(", "))]
    MissingAttributes(Vec<String>),
    #[error("{0}")]
    Failed(String),
}

/// A content producer: reads the questionnaire, yields a localized HTML fragment.
pub type ContentFn = Arc<dyn Fn(&Questionnaire) -> Result<String, DynamicError> + Send + Sync>;

/// Named content producers for inputs of type `dynamic`.
#[derive(Clone, Default)]
pub struct DynamicRegistry {
    funcs: HashMap<String, ContentFn>,
}

impl DynamicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in producers. `url_prefix` is prepended to
    /// static asset paths.
    pub fn with_builtins(catalog: Arc<Catalog>, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into();
        let mut registry = Self::new();

        let c = catalog.clone();
        registry.register(builtin::RESPONSE_STATISTICS, move |q| {
            builtin::response_statistics(&c, q)
        });
        let c = catalog.clone();
        registry.register(builtin::PERSONAL_LINK, move |q| builtin::personal_link(&c, q));
        registry.register(builtin::HAS_EURO_QUESTION, builtin::euro_question);
        registry.register(
            builtin::FEDERAL_STATE_MEDIAN,
            builtin::federal_state_above_or_below_median,
        );
        registry.register(builtin::PARTNER_LOGOS, move |_| {
            Ok(builtin::partner_logos(&url_prefix))
        });

        registry
    }

    /// Register a producer, replacing any of the same name. Builder style.
    pub fn content<F>(mut self, key: &str, f: F) -> Self
    where
        F: Fn(&Questionnaire) -> Result<String, DynamicError> + Send + Sync + 'static,
    {
        self.register(key, f);
        self
    }

    pub fn register<F>(&mut self, key: &str, f: F)
    where
        F: Fn(&Questionnaire) -> Result<String, DynamicError> + Send + Sync + 'static,
    {
        self.funcs.insert(key.to_string(), Arc::new(f));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.funcs.contains_key(key)
    }

    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Fills the label of every dynamic input on page `page_idx` for the
    /// questionnaire's current language.
    ///
    /// A failing or missing producer leaves that label empty and is reported
    /// in the returned list; the remaining inputs are still computed.
    pub fn compute_page(&self, q: &mut Questionnaire, page_idx: usize) -> Vec<(String, DynamicError)> {
        let Some(page) = q.pages.get(page_idx) else {
            return Vec::new();
        };

        let mut computed = Vec::new();
        for (g, group) in page.groups.iter().enumerate() {
            for (i, inp) in group.inputs.iter().enumerate() {
                if inp.kind != InputType::Dynamic {
                    continue;
                }
                let result = match self.funcs.get(&inp.dynamic_func) {
                    Some(f) => f(q),
                    None => Err(DynamicError::Failed(format!(
                        "no content function '{}'",
                        inp.dynamic_func
                    ))),
                };
                computed.push((g, i, result));
            }
        }

        let lang = q.lang_code.clone();
        let mut failures = Vec::new();
        for (g, i, result) in computed {
            let inp = &mut q.pages[page_idx].groups[g].inputs[i];
            match result {
                Ok(html) => inp.label.set(lang.as_str(), html),
                Err(err) => {
                    tracing::warn!(input = %inp.name, key = %inp.dynamic_func, error = %err, "dynamic content failed");
                    inp.label.set(lang.as_str(), "");
                    failures.push((inp.name.clone(), err));
                }
            }
        }
        failures
    }
}

impl std::fmt::Debug for DynamicRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicRegistry")
            .field("funcs", &self.keys())
            .finish()
    }
}
