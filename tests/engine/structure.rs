use quest_engine::questionnaire::{Group, Input, InputType, Page};
use quest_engine::store::GatewayError;
use quest_engine::{
    DocumentKey, DocumentStore, Engine, EngineError, Identity, InMemoryDocumentStore,
    InMemorySession, QuestRequest, StoreError, StructureError,
};

use crate::support::{catalog, template, Harness, SURVEY, USER, WAVE};

fn failure(h: &Harness, identity: &Identity) -> EngineError {
    h.engine
        .handle(identity, &h.session, &QuestRequest::new())
        .unwrap_err()
}

#[test]
fn unknown_rule_is_fatal_and_nothing_is_saved() {
    let mut tpl = template();
    tpl.pages[1].groups[0].inputs[1] =
        Input::new("comment", InputType::Textarea).with_validators(["noSuchRule"]);
    let h = Harness::with_template(&tpl);

    let err = failure(&h, &h.identity());
    assert!(matches!(
        err,
        EngineError::Structure(StructureError::UnknownRule { ref rule, .. }) if rule == "noSuchRule"
    ));
    assert_eq!(err.status_code(), 500);
    assert!(h.stored_bytes().is_none());
}

#[test]
fn unknown_dynamic_content_is_fatal() {
    let mut tpl = template();
    tpl.pages.push(Page::new(vec![Group::new(vec![
        Input::new("x", InputType::Dynamic).with_dynamic_func("Horoscope"),
    ])]));
    let h = Harness::with_template(&tpl);

    let err = failure(&h, &h.identity());
    assert!(matches!(
        err,
        EngineError::Structure(StructureError::UnknownDynamicContent { .. })
    ));
}

#[test]
fn template_for_another_wave_is_rejected() {
    let mut tpl = template();
    tpl.survey.wave_id = "2023-11".into();
    let h = Harness::with_template(&tpl);

    let err = failure(&h, &h.identity());
    assert!(matches!(
        err,
        EngineError::Gateway(GatewayError::IdentityMismatch { ref found_wave, .. }) if found_wave == "2023-11"
    ));
    assert_eq!(err.status_code(), 403);
}

#[test]
fn template_of_another_survey_type_is_rejected() {
    let mut tpl = template();
    tpl.survey.survey_type = "pat".into();
    let h = Harness::with_template(&tpl);

    let err = failure(&h, &h.identity());
    assert!(matches!(
        err,
        EngineError::Gateway(GatewayError::IdentityMismatch { ref found_survey, ref survey, .. })
            if found_survey == "pat" && survey == SURVEY
    ));
    assert_eq!(err.status_code(), 403);
    assert!(h.stored_bytes().is_none());
}

#[test]
fn missing_template() {
    let docs = InMemoryDocumentStore::new();
    let engine = Engine::new(docs, catalog());
    let err = engine
        .handle(
            &Identity::new(USER, SURVEY, WAVE),
            &InMemorySession::new(),
            &QuestRequest::new(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Gateway(GatewayError::TemplateMissing { .. })
    ));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn malformed_template_is_fatal() {
    let h = Harness::new();
    h.docs
        .save(&DocumentKey::template(SURVEY), b"{ \"survey\": ")
        .unwrap();
    let err = failure(&h, &h.identity());
    assert!(matches!(
        err,
        EngineError::Gateway(GatewayError::Malformed { .. })
    ));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn path_like_user_ids_are_rejected() {
    let h = Harness::new();
    for user in ["../u1", "a/b", ".."] {
        let err = failure(&h, &Identity::new(user, SURVEY, WAVE));
        assert!(
            matches!(
                err,
                EngineError::Gateway(GatewayError::Store(StoreError::InvalidKey(_)))
            ),
            "{user}: {err:?}"
        );
        assert_eq!(err.status_code(), 400);
    }
}
