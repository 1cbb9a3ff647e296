//! Identity and session id from request headers.
//!
//! The login layer in front of this service authenticates the respondent and
//! forwards the result as headers:
//!
//! ```text
//! x-quest-user-id:    u-1042
//! x-quest-survey-id:  fmt
//! x-quest-wave-id:    2024-05
//! x-quest-lang:       de
//! x-quest-attr-country: AT
//! x-quest-session:    3f2c…
//! ```

use axum::http::HeaderMap;

use crate::engine::Identity;

pub const HEADER_USER_ID: &str = "x-quest-user-id";
pub const HEADER_SURVEY_ID: &str = "x-quest-survey-id";
pub const HEADER_WAVE_ID: &str = "x-quest-wave-id";
pub const HEADER_LANG: &str = "x-quest-lang";
pub const HEADER_SESSION: &str = "x-quest-session";
pub const HEADER_ATTR_PREFIX: &str = "x-quest-attr-";

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Builds the identity; fields without a header stay empty.
pub fn identity_from_headers(headers: &HeaderMap) -> Identity {
    let mut identity = Identity::new(
        header(headers, HEADER_USER_ID).unwrap_or_default(),
        header(headers, HEADER_SURVEY_ID).unwrap_or_default(),
        header(headers, HEADER_WAVE_ID).unwrap_or_default(),
    );
    identity.lang_code = header(headers, HEADER_LANG).map(str::to_string);
    for (name, value) in headers.iter() {
        if let Some(attr) = name.as_str().strip_prefix(HEADER_ATTR_PREFIX) {
            if let Ok(v) = value.to_str() {
                identity.attrs.insert(attr.to_string(), v.to_string());
            }
        }
    }
    identity
}

/// Browser session id. Without one, the respondent key stands in, so a
/// respondent still gets a single session cache.
pub fn session_id(headers: &HeaderMap, identity: &Identity) -> String {
    match header(headers, HEADER_SESSION) {
        Some(id) => id.to_string(),
        None => format!(
            "respondent:{}/{}/{}",
            identity.survey_type, identity.wave_id, identity.user_id
        ),
    }
}
