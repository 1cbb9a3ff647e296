use std::thread;

use quest_engine::questionnaire::{Group, Input, InputType, Page};
use quest_engine::QuestRequest;

use crate::support::{input, template, Harness};

const WRITERS: usize = 8;

/// Every writer posts a different field of the same page. A lost update
/// would leave one of them blank in the final snapshot.
#[test]
fn concurrent_requests_do_not_lose_updates() {
    let mut tpl = template();
    let fields = (0..WRITERS)
        .map(|i| Input::new(format!("f{i}"), InputType::Text))
        .collect();
    tpl.pages = vec![Page::new(vec![Group::new(fields)])];
    let h = Harness::with_template(&tpl);

    thread::scope(|s| {
        for i in 0..WRITERS {
            let h = &h;
            s.spawn(move || {
                let req = QuestRequest::new().param(format!("f{i}"), format!("v{i}"));
                h.render(req);
            });
        }
    });

    let stored = h.stored();
    for i in 0..WRITERS {
        assert_eq!(input(&stored, &format!("f{i}")).response, format!("v{i}"));
    }
    let cached = h.render(QuestRequest::new());
    assert_eq!(cached.pages, stored.pages);
}

#[test]
fn finished_requests_leave_no_locks_behind() {
    let h = Harness::new();
    for user in ["u1", "u2", "u3"] {
        let identity = quest_engine::Identity::new(user, "fmt", "2024-05");
        h.engine
            .handle(&identity, &quest_engine::InMemorySession::new(), &QuestRequest::new())
            .unwrap();
    }
    assert!(h.engine.locks().len() <= 1);
    h.engine.locks().prune().unwrap();
    assert!(h.engine.locks().is_empty());
}

#[test]
fn respondents_do_not_share_state() {
    let h = Harness::new();
    let other = h.identity();
    let other = quest_engine::Identity::new("u2", other.survey_type, other.wave_id);
    let other_session = quest_engine::InMemorySession::new();

    h.render(QuestRequest::new().param("name", "Ada"));
    let q = h
        .engine
        .handle(&other, &other_session, &QuestRequest::new())
        .unwrap();
    let q = q.questionnaire().unwrap();
    assert_eq!(q.user_id, "u2");
    assert_eq!(input(q, "name").response, "");
}
