//! Serves questionnaires over HTTP.
//!
//! Usage: `quest-server [config.toml]` (default `config.toml`).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use quest_engine::http::{self, AppState};
use quest_engine::{logging, AppConfig, Engine, InMemorySessions};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("info");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let cfg = match AppConfig::load(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "loading config failed");
            return ExitCode::FAILURE;
        }
    };

    let engine = match Engine::from_config(&cfg) {
        Ok(engine) => Arc::new(engine),
        Err(err) => {
            tracing::error!(error = %err, "building engine failed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(data_dir = %cfg.data_dir.display(), langs = ?cfg.lang_codes, "engine ready");

    let sessions = InMemorySessions::with_idle_timeout(cfg.session_idle_timeout());
    let state = Arc::new(AppState::with_sessions(engine, sessions));
    if let Err(err) = http::serve_with_state(state, &cfg.bind_addr).await {
        tracing::error!(error = %err, "server stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
