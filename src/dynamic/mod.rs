//! Dynamic Content Registry.
//!
//! Inputs of type `dynamic` name a content function; before each render the
//! engine asks the registry to fill their labels from the questionnaire's
//! state. Producers never mutate the questionnaire.

mod builtin;
mod registry;

pub use builtin::{
    ATTR_COUNTRY, ATTR_EURO_MEMBER, ATTR_MEDIAN, FEDERAL_STATE_MEDIAN, HAS_EURO_QUESTION,
    PARTNER_LOGOS, PERSONAL_LINK, RESPONSE_STATISTICS,
};
pub(crate) use builtin::DATE_TIME_FORMAT;
pub use registry::{ContentFn, DynamicError, DynamicRegistry};
