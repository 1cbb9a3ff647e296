use std::collections::{BTreeMap, HashMap};

/// Language override.
pub const PARAM_LANG: &str = "lang_code";
/// Navigation control: `prev`, `next` or a page index.
pub const PARAM_SUBMIT: &str = "submitBtn";
/// Secondary "go to page" control, e.g. the progress bar.
pub const PARAM_PAGE: &str = "page";
/// Closes the questionnaire when set to [`crate::questionnaire::VAL_SET`].
pub const PARAM_FINISHED: &str = "finished";
/// Device override: `0|false`, `1|true`, `2|desktop`.
pub const PARAM_MOBILE: &str = "mobile";

/// Who is asking, as established by the login layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub survey_type: String,
    pub wave_id: String,
    /// Login attributes; copied onto the questionnaire wholesale on every request.
    pub attrs: BTreeMap<String, String>,
    /// Language preferred for this user by the login layer, if any.
    pub lang_code: Option<String>,
}

impl Identity {
    pub fn new(
        user_id: impl Into<String>,
        survey_type: impl Into<String>,
        wave_id: impl Into<String>,
    ) -> Self {
        Identity {
            user_id: user_id.into(),
            survey_type: survey_type.into(),
            wave_id: wave_id.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_lang_code(mut self, lang: impl Into<String>) -> Self {
        self.lang_code = Some(lang.into());
        self
    }

    /// Name of the first empty identity field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.user_id.trim().is_empty() {
            return Some("user_id");
        }
        if self.survey_type.trim().is_empty() {
            return Some("survey_type");
        }
        if self.wave_id.trim().is_empty() {
            return Some("wave_id");
        }
        None
    }
}

/// One inbound request: posted form values plus connection details.
#[derive(Debug, Clone, Default)]
pub struct QuestRequest {
    params: HashMap<String, String>,
    pub remote_addr: String,
    pub user_agent: String,
}

impl QuestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later pairs with the same key win.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        QuestRequest {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_param(key, value);
        self
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = addr.into();
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// The value under `key` as a non-negative integer.
    pub fn get_index(&self, key: &str) -> Option<usize> {
        self.get(key)?.trim().parse::<usize>().ok()
    }
}
