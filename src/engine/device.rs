use once_cell::sync::Lazy;
use regex::Regex;
use woothee::parser::Parser;

use crate::questionnaire::{DevicePreference, Questionnaire};

use super::request::{QuestRequest, PARAM_MOBILE};

/// Parser categories that mean a phone or tablet.
const HANDHELD_CATEGORIES: [&str; 2] = ["smartphone", "mobilephone"];

/// Tablet and reader tokens the parser files under "pc".
static HANDHELD_TOKENS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(mobile|tablet|android|ipad|kindle|silk|playbook)\b")
        .expect("handheld token pattern")
});

/// Whether a user agent belongs to a phone or tablet.
///
/// iPadOS in desktop mode sends a plain macOS agent and is classified as a
/// desktop; respondents can force the mobile layout with `mobile=1`.
pub fn is_handheld(user_agent: &str) -> bool {
    if user_agent.trim().is_empty() {
        return false;
    }
    match Parser::new().parse(user_agent) {
        Some(ua) if HANDHELD_CATEGORIES.iter().any(|c| *c == ua.category) => {
            tracing::debug!(name = ua.name, os = ua.os, category = ua.category, "handheld agent");
            true
        }
        Some(ua) => {
            let token = HANDHELD_TOKENS.is_match(user_agent);
            tracing::debug!(name = ua.name, os = ua.os, category = ua.category, token, "agent parsed");
            token
        }
        None => {
            tracing::debug!(user_agent, "agent not recognised");
            HANDHELD_TOKENS.is_match(user_agent)
        }
    }
}

/// Interprets the `mobile` request parameter.
pub fn parse_preference(value: &str) -> Option<DevicePreference> {
    match value.trim() {
        "0" | "false" => Some(DevicePreference::Auto),
        "1" | "true" => Some(DevicePreference::ForcedMobile),
        "2" | "desktop" => Some(DevicePreference::ForcedDesktop),
        _ => None,
    }
}

/// Decides whether to render the mobile layout. An explicit parameter is
/// stored on the questionnaire and wins until reset to auto.
pub(crate) fn resolve_device(q: &mut Questionnaire, req: &QuestRequest) -> bool {
    if let Some(raw) = req.get(PARAM_MOBILE) {
        match parse_preference(raw) {
            Some(pref) => q.mobile = pref,
            None => tracing::warn!(value = raw, "unknown device preference ignored"),
        }
    }
    match q.mobile {
        DevicePreference::ForcedMobile => true,
        DevicePreference::ForcedDesktop => false,
        DevicePreference::Auto => {
            let handheld = is_handheld(&q.user_agent);
            tracing::debug!(user_agent = %q.user_agent, handheld, "device classified");
            handheld
        }
    }
}
