use quest_engine::store::SLOT_LANG;
use quest_engine::{Outcome, QuestRequest, SessionStore};

use crate::support::{input, next, Harness};

const PHONE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Mobile Safari/537.36";
const DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[test]
fn first_application_language_by_default() {
    let h = Harness::new();
    let q = h.render(QuestRequest::new());
    assert_eq!(q.lang_code, "en");
    assert_eq!(h.session.get(SLOT_LANG).unwrap().as_deref(), Some("en"));
}

#[test]
fn identity_language_beats_application_default() {
    let h = Harness::new();
    let identity = h.identity().with_lang_code("de");
    let outcome = h
        .engine
        .handle(&identity, &h.session, &QuestRequest::new())
        .unwrap();
    assert_eq!(outcome.questionnaire().unwrap().lang_code, "de");
}

#[test]
fn request_parameter_switches_and_sticks() {
    let h = Harness::new();
    let q = h.render(next().param("lang_code", "de"));
    assert_eq!(q.lang_code, "de");
    assert_eq!(
        input(&q, "name").err_msg.as_deref(),
        Some("Bitte füllen Sie dieses Feld aus.")
    );
    assert_eq!(h.session.get(SLOT_LANG).unwrap().as_deref(), Some("de"));

    let q = h.render(QuestRequest::new());
    assert_eq!(q.lang_code, "de");
}

#[test]
fn unknown_language_is_ignored() {
    let h = Harness::new();
    h.render(QuestRequest::new());
    let q = h.render(QuestRequest::new().param("lang_code", "tlh"));
    assert_eq!(q.lang_code, "en");
}

#[test]
fn session_language_used_for_fresh_questionnaire() {
    let h = Harness::new();
    h.session.put(SLOT_LANG, "de".into()).unwrap();
    let q = h.render(QuestRequest::new());
    assert_eq!(q.lang_code, "de");
}

fn mobile(outcome: &Outcome) -> bool {
    match outcome {
        Outcome::Render { mobile, .. } => *mobile,
        other => panic!("expected render, got {other:?}"),
    }
}

#[test]
fn device_follows_user_agent_until_forced() {
    let h = Harness::new();
    assert!(mobile(&h.send(QuestRequest::new().with_user_agent(PHONE))));
    assert!(!mobile(&h.send(QuestRequest::new().with_user_agent(DESKTOP))));

    let forced = QuestRequest::new().with_user_agent(DESKTOP).param("mobile", "1");
    assert!(mobile(&h.send(forced)));
    assert!(mobile(&h.send(QuestRequest::new().with_user_agent(DESKTOP))));

    let desktop = QuestRequest::new().with_user_agent(PHONE).param("mobile", "2");
    assert!(!mobile(&h.send(desktop)));
    assert!(!mobile(&h.send(QuestRequest::new().with_user_agent(PHONE))));

    let auto = QuestRequest::new().with_user_agent(PHONE).param("mobile", "0");
    assert!(mobile(&h.send(auto)));
    assert_eq!(h.stored().mobile, quest_engine::DevicePreference::Auto);
}
