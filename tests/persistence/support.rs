use std::path::Path;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use quest_engine::questionnaire::{Group, Input, InputType, Page, Questionnaire, Survey};
use quest_engine::{Catalog, Engine, FixedClock, FsDocumentStore, Identity};

pub const SURVEY: &str = "fmt";
pub const WAVE: &str = "2024-05";

/// Two pages: a required name, then a free comment.
pub fn template() -> Questionnaire {
    let survey = Survey {
        survey_type: SURVEY.into(),
        wave_id: WAVE.into(),
        deadline: Utc.with_ymd_and_hms(2024, 5, 31, 18, 0, 0).unwrap(),
    };
    Questionnaire::new(
        survey,
        vec![
            Page::new(vec![Group::new(vec![
                Input::new("name", InputType::Text).with_validators(["must"])
            ])]),
            Page::new(vec![Group::new(vec![Input::new(
                "comment",
                InputType::Textarea,
            )])]),
        ],
    )
}

/// Writes the template where the file store expects it.
pub fn install_template(root: &Path, q: &Questionnaire) {
    let path = root.join(format!("{}.json", q.survey.survey_type));
    std::fs::create_dir_all(root).unwrap();
    std::fs::write(path, serde_json::to_vec_pretty(q).unwrap()).unwrap();
}

pub fn engine(root: &Path) -> Engine<FsDocumentStore> {
    let catalog = Arc::new(Catalog::builtin(vec!["en".into()]));
    Engine::new(FsDocumentStore::new(root), catalog)
        .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap()))
}

pub fn identity(user: &str) -> Identity {
    Identity::new(user, SURVEY, WAVE)
}
