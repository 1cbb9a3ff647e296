//! Validator Registry.
//!
//! Rules are pure functions of `(lang_code, raw_value)`. An input lists rule
//! names in order; all of them run and the last failure is what the input
//! keeps as its error message.

mod numeric;
mod registry;

pub use numeric::{check_range, normalize_number};
pub use registry::{Rule, RuleError, ValidatorRegistry, RANGE_RULES};
