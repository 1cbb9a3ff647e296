use crate::questionnaire::{InputType, Questionnaire};

use super::request::QuestRequest;

/// Escapes `< > & ' "` the way browsers expect inside attributes and text.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            c => out.push(c),
        }
    }
    out
}

/// Copies posted values onto the inputs of page `page_idx`, escaped.
/// Inputs without a posted value keep their response; layout and dynamic
/// inputs are never written. Returns how many inputs were written.
pub(crate) fn capture_page(q: &mut Questionnaire, page_idx: usize, req: &QuestRequest) -> usize {
    let Some(page) = q.pages.get_mut(page_idx) else {
        return 0;
    };
    let mut written = 0;
    for inp in page.inputs_mut() {
        if inp.is_layout() || inp.kind == InputType::Dynamic {
            continue;
        }
        if let Some(val) = req.get(&inp.name) {
            tracing::debug!(page = page_idx, input = %inp.name, value = %val, "response captured");
            inp.response = escape_html(val);
            written += 1;
        }
    }
    written
}
