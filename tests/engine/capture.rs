use quest_engine::engine::PARAM_SUBMIT;
use quest_engine::QuestRequest;

use crate::support::{input, next, Harness};

#[test]
fn responses_are_escaped() {
    let h = Harness::new();
    let q = h.render(next().param("name", "<script>alert('hi')</script>"));
    assert_eq!(
        input(&q, "name").response,
        "&lt;script&gt;alert(&#39;hi&#39;)&lt;/script&gt;"
    );
    assert_eq!(q.curr_page, 1);
}

#[test]
fn only_the_page_left_is_captured() {
    let h = Harness::new();
    let q = h.render(
        next()
            .param("name", "Ada")
            .param("satisfied", "2")
            .param("comment", "early"),
    );
    assert_eq!(q.curr_page, 1);
    assert_eq!(input(&q, "satisfied").response, "0");
    assert_eq!(input(&q, "comment").response, "");

    let q = h.render(QuestRequest::new().param("comment", "late").param("satisfied", "2"));
    assert_eq!(input(&q, "comment").response, "late");
    assert_eq!(input(&q, "name").response, "Ada");
}

#[test]
fn unposted_inputs_keep_their_response() {
    let h = Harness::new();
    h.render(QuestRequest::new().param("name", "Ada").param("income", "10"));
    let q = h.render(QuestRequest::new().param("income", "20"));
    assert_eq!(input(&q, "name").response, "Ada");
    assert_eq!(input(&q, "income").response, "20");
}

#[test]
fn bookkeeping_and_attributes() {
    let h = Harness::new();
    let identity = h
        .identity()
        .with_attr("country", "AT")
        .with_attr("euro-member", "yes");
    let req = QuestRequest::new()
        .param(PARAM_SUBMIT, "next")
        .param("name", "Ada")
        .with_remote_addr("10.0.0.7:51234")
        .with_user_agent("curl/8.5");
    let outcome = h.engine.handle(&identity, &h.session, &req).unwrap();
    let q = outcome.questionnaire().unwrap();
    assert_eq!(q.remote_ip, "10.0.0.7:51234");
    assert_eq!(q.user_agent, "curl/8.5");
    assert_eq!(q.attrs.len(), 2);

    // attributes are replaced, not merged; an empty address keeps the old one
    let identity = h.identity().with_attr("country", "DE");
    let outcome = h
        .engine
        .handle(&identity, &h.session, &QuestRequest::new())
        .unwrap();
    let q = outcome.questionnaire().unwrap();
    assert_eq!(q.attrs.len(), 1);
    assert_eq!(q.attrs["country"], "DE");
    assert_eq!(q.remote_ip, "10.0.0.7:51234");
    assert_eq!(q.user_agent, "");
}

#[test]
fn durable_round_trip_preserves_responses() {
    let h = Harness::new();
    h.render(next().param("name", "Ada & Bob").param("income", "-100"));
    h.render(next().param("satisfied", "3").param("comment", "fine"));
    let cached = h.stored();

    h.engine.on_login(&h.session).unwrap();
    let reloaded = h.render(QuestRequest::new());
    for name in ["name", "income", "satisfied", "comment"] {
        assert_eq!(
            input(&reloaded, name).response,
            input(&cached, name).response,
            "{name}"
        );
    }
    assert_eq!(input(&reloaded, "name").response, "Ada &amp; Bob");
}

#[test]
fn posted_values_never_reach_dynamic_inputs() {
    let h = Harness::new();
    h.render(next().param("name", "Ada").param("income", "5"));
    h.render(next().param("satisfied", "1"));

    let q = h.render(
        QuestRequest::new()
            .param("stats", "forged")
            .param("link", "forged"),
    );
    assert_eq!(q.curr_page, 2);
    assert_eq!(input(&q, "stats").response, "");
    assert_eq!(input(&q, "link").response, "");
    assert!(input(&q, "stats")
        .label
        .get("en")
        .unwrap()
        .starts_with("You answered 3 out of 6 questions"));
}
