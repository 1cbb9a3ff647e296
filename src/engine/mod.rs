//! Navigation & Capture Engine.
//!
//! One [`Engine::handle`] call per request: gate checks, language and device
//! resolution, response capture onto the page the respondent was on,
//! validation gating, close detection, dynamic content and persistence.

mod capture;
mod device;
mod engine;
mod error;
mod language;
mod navigation;
mod outcome;
mod request;

pub use capture::escape_html;
pub use device::{is_handheld, parse_preference};
pub use engine::Engine;
pub use error::EngineError;
pub use navigation::Intent;
pub use outcome::{FieldError, Outcome, View};
pub use request::{
    Identity, QuestRequest, PARAM_FINISHED, PARAM_LANG, PARAM_MOBILE, PARAM_PAGE, PARAM_SUBMIT,
};
