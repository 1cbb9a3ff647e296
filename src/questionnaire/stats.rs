use std::collections::HashSet;

use super::model::{Questionnaire, VAL_EMPTY};

/// Response-rate figures across the whole questionnaire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseStatistics {
    pub answered: usize,
    pub total: usize,
    pub percentage: f64,
}

impl Questionnaire {
    /// Counts each non-layout input name once; blank and `"0"` responses are unanswered.
    pub fn statistics(&self) -> ResponseStatistics {
        let mut seen = HashSet::new();
        let mut answered = 0;
        let mut total = 0;
        for inp in self.inputs() {
            if inp.is_layout() || !seen.insert(inp.name.as_str()) {
                continue;
            }
            total += 1;
            if !inp.response.is_empty() && inp.response != VAL_EMPTY {
                answered += 1;
            }
        }
        let percentage = if total == 0 {
            0.0
        } else {
            100.0 * answered as f64 / total as f64
        };
        ResponseStatistics {
            answered,
            total,
            percentage,
        }
    }
}
