use quest_engine::questionnaire::{Group, Input, InputType, Page};
use quest_engine::{DynamicError, DynamicRegistry, QuestRequest};

use crate::support::{input, next, template, Harness};

fn to_last_page(h: &Harness) -> quest_engine::Questionnaire {
    h.render(next().param("name", "Ada").param("income", "5"));
    h.render(next().param("satisfied", "1"))
}

#[test]
fn builtin_content_on_the_resulting_page() {
    let h = Harness::new();
    let q = to_last_page(&h);
    assert_eq!(q.curr_page, 2);
    assert_eq!(
        input(&q, "stats").label.get("en"),
        Some(
            "You answered 3 out of 6 questions: 50 percent. <br>\
             Survey will end on 31.05.2024 18:00. Results available from 01.06.2024. <br>"
        )
    );
    assert_eq!(
        input(&q, "link").label.get("en"),
        Some("You may revise your answers via your personal link until the survey ends.")
    );
}

#[test]
fn content_is_not_computed_for_other_pages() {
    let h = Harness::new();
    let q = h.render(QuestRequest::new());
    assert!(input(&q, "stats").label.get("en").is_none());
}

#[test]
fn failing_producer_degrades_to_empty() {
    let mut tpl = template();
    tpl.pages.push(Page::new(vec![Group::new(vec![
        Input::new("euro", InputType::Dynamic).with_dynamic_func("HasEuroQuestion"),
        Input::new("broken", InputType::Dynamic).with_dynamic_func("Broken"),
    ])]));
    let h = Harness::with_template(&tpl);
    let catalog = crate::support::catalog();
    let engine = quest_engine::Engine::new(h.docs.clone(), catalog.clone())
        .with_clock(h.clock.clone())
        .with_dynamic(
            DynamicRegistry::with_builtins(catalog, "")
                .content("Broken", |_| Err(DynamicError::Failed("boom".into()))),
        );

    let outcome = engine
        .handle(
            &h.identity(),
            &h.session,
            &QuestRequest::new().param("page", "3").param("name", "Ada"),
        )
        .unwrap();
    let q = outcome.questionnaire().unwrap();
    assert_eq!(q.curr_page, 3);
    // no euro attributes on this identity
    assert_eq!(input(q, "euro").label.get("en"), Some(""));
    assert_eq!(input(q, "broken").label.get("en"), Some(""));

    let identity = h
        .identity()
        .with_attr("euro-member", "no")
        .with_attr("country", "PL");
    let outcome = engine
        .handle(&identity, &h.session, &QuestRequest::new())
        .unwrap();
    let label = input(outcome.questionnaire().unwrap(), "euro")
        .label
        .get("en")
        .unwrap()
        .to_string();
    assert!(label.contains("Introducing the euro in Poland"), "{label}");
}
