//! Questionnaire data model.
//!
//! A `Questionnaire` is the aggregate root: one instance per respondent per
//! wave, instantiated from a per-survey template and mutated by the engine on
//! every request. Pages are ordered and fixed in length; `curr_page` always
//! indexes into them.

mod model;
mod stats;
mod structure;

pub use model::{
    DevicePreference, Group, Input, InputType, LanguageError, Page, Questionnaire, Survey,
    VAL_EMPTY, VAL_SET,
};
pub use stats::ResponseStatistics;
pub use structure::StructureError;
