use chrono::{Duration, Timelike};
use quest_engine::{Outcome, QuestRequest};

use crate::support::{deadline, input, next, now, Harness};

#[test]
fn deadline_leaves_snapshot_untouched() {
    let h = Harness::new();
    h.render(next().param("name", "Ada"));
    let before = h.stored_bytes().unwrap();

    h.clock.set(deadline() + Duration::seconds(1));
    let outcome = h.send(
        QuestRequest::new()
            .param("submitBtn", "prev")
            .param("name", "Mallory")
            .param("finished", "1"),
    );

    match outcome {
        Outcome::DeadlineExceeded { banner } => {
            assert_eq!(
                banner,
                "The survey closed at 31.05.2024 18:00.\n\nDie Umfrage wurde am 31.05.2024 18:00 beendet.\n\n"
            );
        }
        other => panic!("expected deadline banner, got {other:?}"),
    }
    assert_eq!(h.stored_bytes().unwrap(), before);
    let stored = h.stored();
    assert_eq!(stored.curr_page, 1);
    assert_eq!(input(&stored, "name").response, "Ada");
}

#[test]
fn deadline_instant_itself_is_still_open() {
    let h = Harness::new();
    h.clock.set(deadline());
    assert!(h.send(QuestRequest::new()).questionnaire().is_some());
}

#[test]
fn finishing_closes_the_questionnaire() {
    let h = Harness::new();
    let q = h.render(next().param("name", "Ada").param("finished", "1"));
    let closed_at = q.closing_time.expect("closing time stamped");
    assert_eq!(closed_at, now().with_nanosecond(0).unwrap());
    assert!(q.finished_entirely());
    assert!(h.stored().is_closed());

    h.clock.advance(Duration::hours(1));
    let before = h.stored_bytes().unwrap();
    let outcome = h.send(next().param("name", "Eve").param("finished", "1"));
    let banner = outcome.banner().expect("closed banner");
    assert!(banner.starts_with("You finished this survey at 15.05.2024 10:00. Thank you."));
    assert!(banner.contains("Sie haben diese Umfrage am 15.05.2024 10:00 abgeschlossen."));
    assert!(matches!(outcome, Outcome::Closed { .. }));
    assert_eq!(h.stored_bytes().unwrap(), before);
}

#[test]
fn finished_sentinel_must_match() {
    let h = Harness::new();
    let q = h.render(next().param("name", "Ada").param("finished", "yes"));
    assert!(q.closing_time.is_none());
}

#[test]
fn closing_does_not_bypass_validation() {
    let h = Harness::new();
    let q = h.render(next().param("finished", "1"));
    assert_eq!(q.curr_page, 0);
    assert!(q.has_errors);
    assert!(q.is_closed());
}

#[test]
fn missing_identity_is_unauthorized() {
    let h = Harness::new();
    let mut identity = h.identity();
    identity.wave_id.clear();
    let err = h
        .engine
        .handle(&identity, &h.session, &QuestRequest::new())
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
    assert!(h.stored_bytes().is_none());
}
