use chrono::Timelike;
use quest_engine::QuestRequest;

use crate::support::{input, next, prev, Harness};

fn valid_page0() -> QuestRequest {
    next().param("name", "Ada").param("income", "12,5")
}

#[test]
fn blank_required_field_blocks_next() {
    let h = Harness::new();
    let q = h.render(next().param("name", "  "));

    assert_eq!(q.curr_page, 0);
    assert!(q.has_errors);
    assert_eq!(
        input(&q, "name").err_msg.as_deref(),
        Some("Please fill in this field.")
    );

    let stored = h.stored();
    assert_eq!(stored.curr_page, 0);
    assert!(stored.has_errors);
}

#[test]
fn fixing_the_field_lets_the_respondent_move_on() {
    let h = Harness::new();
    h.render(next());

    let q = h.render(valid_page0());
    assert_eq!(q.curr_page, 1);
    assert!(!q.has_errors);
    assert!(input(&q, "name").err_msg.is_none());
    assert_eq!(input(&q, "income").response, "12,5");
    assert!(q.pages[0].finished.is_some());
}

#[test]
fn finished_stamp_is_first_departure_and_stable() {
    let h = Harness::new();
    let q = h.render(next());
    let first = q.pages[0].finished.expect("stamped even though the page is invalid");
    assert_eq!(first, crate::support::now().with_nanosecond(0).unwrap());

    h.clock.advance(chrono::Duration::minutes(3));
    let q = h.render(valid_page0());
    assert_eq!(q.pages[0].finished, Some(first));

    h.clock.advance(chrono::Duration::minutes(3));
    let q = h.render(prev().param("satisfied", "1"));
    assert_eq!(q.curr_page, 0);
    assert_eq!(q.pages[0].finished, Some(first));
    assert!(q.pages[1].finished.is_some());
}

#[test]
fn invalid_page_blocks_every_direction() {
    let h = Harness::new();
    h.render(valid_page0());

    // page 1 has a radio group still holding the "nothing chosen" sentinel
    for req in [
        prev(),
        next(),
        QuestRequest::new().param("submitBtn", "0"),
        QuestRequest::new().param("page", "2"),
    ] {
        let q = h.render(req);
        assert_eq!(q.curr_page, 1);
        assert!(q.has_errors);
        assert_eq!(
            input(&q, "satisfied").err_msg.as_deref(),
            Some("Please choose one option.")
        );
    }
}

#[test]
fn prev_at_first_and_next_at_last_stay_put() {
    let h = Harness::new();
    let q = h.render(prev().param("name", "Ada"));
    assert_eq!(q.curr_page, 0);

    h.render(valid_page0());
    h.render(next().param("satisfied", "2"));
    let q = h.render(next());
    assert_eq!(q.curr_page, 2);
}

#[test]
fn page_control_overrides_submit_button() {
    let h = Harness::new();
    h.render(valid_page0());
    let q = h.render(
        QuestRequest::new()
            .param("submitBtn", "next")
            .param("page", "0")
            .param("satisfied", "1"),
    );
    assert_eq!(q.curr_page, 0);
}

#[test]
fn explicit_jump_and_out_of_range_jump() {
    let h = Harness::new();
    let q = h.render(
        QuestRequest::new()
            .param("submitBtn", "2")
            .param("name", "Ada"),
    );
    assert_eq!(q.curr_page, 2);

    let q = h.render(QuestRequest::new().param("page", "99"));
    assert_eq!(q.curr_page, 2);
}

#[test]
fn range_rule_errors_are_localized() {
    let h = Harness::new();
    let q = h.render(valid_page0().param("income", "2500").param("lang_code", "de"));
    assert_eq!(q.curr_page, 0);
    assert_eq!(
        input(&q, "income").err_msg.as_deref(),
        Some("Maximal 1000 erlaubt.")
    );
}

#[test]
fn errors_on_pages_not_revalidated_are_kept() {
    let h = Harness::new();
    let mut q = h.render(QuestRequest::new());
    for inp in q.pages[1].inputs_mut() {
        if inp.name == "satisfied" {
            inp.err_msg = Some("stale".into());
        }
    }
    h.store(&q);

    // page 0 is valid, so the jump to page 2 passes over page 1
    let q = h.render(valid_page0().param("page", "2"));
    assert_eq!(q.curr_page, 2);
    assert!(!q.has_errors);
    assert_eq!(input(&q, "satisfied").err_msg.as_deref(), Some("stale"));
    assert_eq!(q.error_messages(), vec![(1, "satisfied", "stale")]);
}

#[test]
fn stored_page_out_of_range_is_clamped() {
    let h = Harness::new();
    let mut q = h.render(QuestRequest::new());
    q.curr_page = 17;
    h.store(&q);

    let q = h.render(QuestRequest::new());
    assert_eq!(q.curr_page, 0);
    assert_eq!(h.stored().curr_page, 0);
}
