//! Translation lookup.
//!
//! `Translations` holds one text in several languages; `Catalog` maps message
//! keys to translations for the application-wide banners and validation
//! messages. Lookups fall back to the first configured language and then to
//! a visible "no translation" marker.

mod catalog;
mod countries;
mod format;
mod translations;

pub use catalog::{Catalog, CatalogError};
pub use countries::country_name;
pub use format::fill_placeholders;
pub use translations::{Translations, NO_TRANSLATION};
