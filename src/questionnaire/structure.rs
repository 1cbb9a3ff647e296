use std::collections::HashSet;

use thiserror::Error;

use super::model::{InputType, Questionnaire};

/// Structural defects found in a loaded questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("questionnaire has no pages")]
    NoPages,
    #[error("page {page} has no groups")]
    EmptyPage { page: usize },
    #[error("input on page {page} has an empty name")]
    UnnamedInput { page: usize },
    #[error("input name '{name}' is used more than once")]
    DuplicateName { name: String },
    #[error("dynamic input '{name}' names no content function")]
    MissingDynamicFunc { name: String },
    #[error("input '{input}' references unknown validation rule '{rule}'")]
    UnknownRule { input: String, rule: String },
    #[error("input '{input}' references unknown dynamic content '{key}'")]
    UnknownDynamicContent { input: String, key: String },
}

impl Questionnaire {
    /// Checks the page/group/input graph. Response payloads are not inspected.
    pub fn validate_structure(&self) -> Result<(), StructureError> {
        if self.pages.is_empty() {
            return Err(StructureError::NoPages);
        }
        let mut seen = HashSet::new();
        for (idx, page) in self.pages.iter().enumerate() {
            if page.groups.is_empty() {
                return Err(StructureError::EmptyPage { page: idx });
            }
            for inp in page.inputs() {
                if inp.is_layout() {
                    continue;
                }
                if inp.name.trim().is_empty() {
                    return Err(StructureError::UnnamedInput { page: idx });
                }
                if !seen.insert(inp.name.as_str()) {
                    return Err(StructureError::DuplicateName {
                        name: inp.name.clone(),
                    });
                }
                if inp.kind == InputType::Dynamic && inp.dynamic_func.trim().is_empty() {
                    return Err(StructureError::MissingDynamicFunc {
                        name: inp.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolves every rule name and dynamic content key against the given
    /// lookups, failing on the first one that is unknown.
    pub fn resolve_references<R, D>(&self, has_rule: R, has_content: D) -> Result<(), StructureError>
    where
        R: Fn(&str) -> bool,
        D: Fn(&str) -> bool,
    {
        for inp in self.inputs() {
            for rule in &inp.validators {
                if !has_rule(rule.trim()) {
                    return Err(StructureError::UnknownRule {
                        input: inp.name.clone(),
                        rule: rule.clone(),
                    });
                }
            }
            if inp.kind == InputType::Dynamic && !has_content(&inp.dynamic_func) {
                return Err(StructureError::UnknownDynamicContent {
                    input: inp.name.clone(),
                    key: inp.dynamic_func.clone(),
                });
            }
        }
        Ok(())
    }
}
