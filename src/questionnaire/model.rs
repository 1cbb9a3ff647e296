use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Translations;

/// Sentinel stored by checkbox inputs when they are checked, and submitted as
/// the "finished" control value to close a questionnaire.
pub const VAL_SET: &str = "1";

/// Sentinel posted by the hidden catcher of radio and checkbox groups when the
/// respondent chose nothing.
pub const VAL_EMPTY: &str = "0";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    #[error("language code '{code}' is not among {offered:?}")]
    NotOffered { code: String, offered: Vec<String> },
}

/// The survey a questionnaire belongs to, embedded in every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub survey_type: String,
    pub wave_id: String,
    /// After this instant the questionnaire no longer accepts requests.
    pub deadline: DateTime<Utc>,
}

/// Respondent's device preference. Forced values are sticky across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevicePreference {
    #[default]
    Auto,
    ForcedMobile,
    ForcedDesktop,
}

/// Closed set of input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputType {
    Text,
    Number,
    Textarea,
    Checkbox,
    Dropdown,
    Radiogroup,
    Checkboxgroup,
    Textblock,
    Button,
    Dynamic,
    Composite,
    CompositeScalar,
}

impl InputType {
    /// Layout-only inputs carry no response and are never captured or validated.
    pub fn is_layout(self) -> bool {
        matches!(
            self,
            InputType::Textblock
                | InputType::Button
                | InputType::Composite
                | InputType::CompositeScalar
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InputType,
    #[serde(default)]
    pub label: Translations,
    #[serde(default)]
    pub desc: Translations,
    /// Raw response, HTML-escaped on capture.
    #[serde(default)]
    pub response: String,
    /// Rule names, executed in order.
    #[serde(default)]
    pub validators: Vec<String>,
    /// Localized error text from the last validation pass over this input's page.
    #[serde(default)]
    pub err_msg: Option<String>,
    /// Key into the dynamic content registry; only meaningful for `InputType::Dynamic`.
    #[serde(default)]
    pub dynamic_func: String,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
    #[serde(default)]
    pub max_chars: usize,
}

impl Input {
    pub fn new(name: impl Into<String>, kind: InputType) -> Self {
        Input {
            name: name.into(),
            kind,
            label: Translations::default(),
            desc: Translations::default(),
            response: String::new(),
            validators: Vec::new(),
            err_msg: None,
            dynamic_func: String::new(),
            min: 0.0,
            max: 0.0,
            max_chars: 0,
        }
    }

    pub fn with_validators<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validators = rules.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dynamic_func(mut self, key: impl Into<String>) -> Self {
        self.dynamic_func = key.into();
        self
    }

    pub fn is_layout(&self) -> bool {
        self.kind.is_layout()
    }

    pub fn has_error(&self) -> bool {
        self.err_msg.is_some()
    }
}

/// Presentation grouping of inputs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub label: Translations,
    pub inputs: Vec<Input>,
}

impl Group {
    pub fn new(inputs: Vec<Input>) -> Self {
        Group {
            label: Translations::default(),
            inputs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub label: Translations,
    pub groups: Vec<Group>,
    /// Set the first time the respondent leaves this page; never overwritten.
    #[serde(default)]
    pub finished: Option<DateTime<Utc>>,
}

impl Page {
    pub fn new(groups: Vec<Group>) -> Self {
        Page {
            label: Translations::default(),
            groups,
            finished: None,
        }
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Input> {
        self.groups.iter().flat_map(|g| g.inputs.iter())
    }

    pub fn inputs_mut(&mut self) -> impl Iterator<Item = &mut Input> {
        self.groups.iter_mut().flat_map(|g| g.inputs.iter_mut())
    }

    /// Stamps `finished` unless it is already set. Returns whether it stamped.
    pub fn mark_finished(&mut self, at: DateTime<Utc>) -> bool {
        if self.finished.is_some() {
            return false;
        }
        self.finished = Some(at);
        true
    }
}

/// Aggregate root: one per respondent per wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub survey: Survey,
    #[serde(default)]
    pub user_id: String,
    /// Languages this questionnaire is translated into, in preference order.
    #[serde(default)]
    pub lang_codes: Vec<String>,
    #[serde(default)]
    pub lang_code: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub curr_page: usize,
    #[serde(default)]
    pub closing_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mobile: DevicePreference,
    #[serde(default)]
    pub has_errors: bool,
    #[serde(default)]
    pub remote_ip: String,
    #[serde(default)]
    pub user_agent: String,
    pub pages: Vec<Page>,
}

impl Questionnaire {
    pub fn new(survey: Survey, pages: Vec<Page>) -> Self {
        Questionnaire {
            survey,
            user_id: String::new(),
            lang_codes: Vec::new(),
            lang_code: String::new(),
            attrs: BTreeMap::new(),
            curr_page: 0,
            closing_time: None,
            mobile: DevicePreference::Auto,
            has_errors: false,
            remote_ip: String::new(),
            user_agent: String::new(),
            pages,
        }
    }

    pub fn survey_type(&self) -> &str {
        &self.survey.survey_type
    }

    pub fn wave_id(&self) -> &str {
        &self.survey.wave_id
    }

    pub fn is_closed(&self) -> bool {
        self.closing_time.is_some()
    }

    /// Whether the respondent has explicitly closed the questionnaire.
    pub fn finished_entirely(&self) -> bool {
        self.is_closed()
    }

    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        now > self.survey.deadline
    }

    /// Forces `curr_page` back into `[0, pages.len())`. Returns whether it changed.
    pub fn clamp_curr_page(&mut self) -> bool {
        if self.curr_page < self.pages.len() {
            return false;
        }
        self.curr_page = 0;
        true
    }

    /// One page back, never below zero.
    pub fn prev(&self) -> usize {
        self.curr_page.saturating_sub(1)
    }

    /// One page forward, never past the last page.
    pub fn next(&self) -> usize {
        let last = self.pages.len().saturating_sub(1);
        (self.curr_page + 1).min(last)
    }

    /// Sets the language if the questionnaire offers it. `fallback` is consulted
    /// when the questionnaire does not list any languages itself.
    pub fn set_lang_code(&mut self, code: &str, fallback: &[String]) -> Result<(), LanguageError> {
        let offered = if self.lang_codes.is_empty() {
            fallback
        } else {
            &self.lang_codes
        };
        if !offered.iter().any(|c| c == code) {
            return Err(LanguageError::NotOffered {
                code: code.to_string(),
                offered: offered.to_vec(),
            });
        }
        self.lang_code = code.to_string();
        Ok(())
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Input> {
        self.pages.iter().flat_map(|p| p.inputs())
    }

    /// Every input currently carrying an error, with its page index.
    pub fn error_messages(&self) -> Vec<(usize, &str, &str)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(idx, page)| {
                page.inputs().filter_map(move |inp| {
                    inp.err_msg
                        .as_deref()
                        .map(|msg| (idx, inp.name.as_str(), msg))
                })
            })
            .collect()
    }
}
