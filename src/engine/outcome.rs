use serde::Serialize;

use crate::questionnaire::{Page, Questionnaire};

/// Result of one engine pass.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Show the questionnaire on its current page.
    Render {
        questionnaire: Box<Questionnaire>,
        mobile: bool,
    },
    /// The respondent closed the questionnaire earlier.
    Closed { banner: String },
    /// The survey deadline has passed.
    DeadlineExceeded { banner: String },
}

impl Outcome {
    pub fn questionnaire(&self) -> Option<&Questionnaire> {
        match self {
            Outcome::Render { questionnaire, .. } => Some(questionnaire),
            _ => None,
        }
    }

    pub fn banner(&self) -> Option<&str> {
        match self {
            Outcome::Closed { banner } | Outcome::DeadlineExceeded { banner } => Some(banner),
            Outcome::Render { .. } => None,
        }
    }

    /// The data a renderer needs for this outcome.
    pub fn view(&self) -> View<'_> {
        match self {
            Outcome::Render {
                questionnaire: q,
                mobile,
            } => View::Page {
                lang_code: &q.lang_code,
                curr_page: q.curr_page,
                page_count: q.pages.len(),
                mobile: *mobile,
                has_errors: q.has_errors,
                closed: q.is_closed(),
                page: q.pages.get(q.curr_page),
                errors: q
                    .error_messages()
                    .into_iter()
                    .map(|(page, input, message)| FieldError {
                        page,
                        input,
                        message,
                    })
                    .collect(),
            },
            Outcome::Closed { banner } => View::Closed { banner },
            Outcome::DeadlineExceeded { banner } => View::DeadlineExceeded { banner },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FieldError<'a> {
    pub page: usize,
    pub input: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum View<'a> {
    Page {
        lang_code: &'a str,
        curr_page: usize,
        page_count: usize,
        mobile: bool,
        has_errors: bool,
        closed: bool,
        page: Option<&'a Page>,
        errors: Vec<FieldError<'a>>,
    },
    Closed {
        banner: &'a str,
    },
    DeadlineExceeded {
        banner: &'a str,
    },
}
