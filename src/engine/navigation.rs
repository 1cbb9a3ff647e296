use crate::questionnaire::Questionnaire;

use super::request::{QuestRequest, PARAM_PAGE, PARAM_SUBMIT};

/// Where the respondent asked to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Stay,
    Prev,
    Next,
    Jump(usize),
}

impl Intent {
    /// Reads the submit control, then lets the page control override it.
    pub fn from_request(req: &QuestRequest) -> Intent {
        let mut intent = match req.get(PARAM_SUBMIT).map(str::trim) {
            Some("prev") => Intent::Prev,
            Some("next") => Intent::Next,
            _ => match req.get_index(PARAM_SUBMIT) {
                Some(idx) => Intent::Jump(idx),
                None => Intent::Stay,
            },
        };
        // the page control is only posted when actually used
        if let Some(idx) = req.get_index(PARAM_PAGE) {
            intent = Intent::Jump(idx);
        }
        intent
    }

    /// Target page relative to the page the respondent is on.
    /// A jump outside the questionnaire stays put.
    pub fn target(self, q: &Questionnaire) -> usize {
        match self {
            Intent::Stay => q.curr_page,
            Intent::Prev => q.prev(),
            Intent::Next => q.next(),
            Intent::Jump(idx) if idx < q.pages.len() => idx,
            Intent::Jump(idx) => {
                tracing::warn!(requested = idx, pages = q.pages.len(), "page index out of range ignored");
                q.curr_page
            }
        }
    }
}
