//! HTTP transport. Requires the `http` feature.
//!
//! ## Routes
//!
//! - `GET /`, `POST /` run one engine pass. Form values come from the query
//!   string and, for `POST`, an urlencoded body. The response is the JSON view
//!   of the outcome.
//! - `POST /login` ends the caller's session; the next request starts a
//!   fresh one and resumes from the durable document.
//! - `GET /health` returns `{ "ok": true, ... }`.
//!
//! ## Example
//!
//! ```ignore
//! let engine = Arc::new(Engine::from_config(&cfg)?);
//! quest_engine::http::serve(engine, &cfg.bind_addr).await?;
//! ```

mod headers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header::USER_AGENT, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::json;

use crate::engine::{Engine, EngineError, QuestRequest};
use crate::lock::LockManager;
use crate::store::{DocumentStore, InMemorySessions, StoreError};

pub use headers::{
    identity_from_headers, session_id, HEADER_ATTR_PREFIX, HEADER_LANG, HEADER_SESSION,
    HEADER_SURVEY_ID, HEADER_USER_ID, HEADER_WAVE_ID,
};

type Pairs = Vec<(String, String)>;

/// Shared state of the router: the engine and the live browser sessions.
pub struct AppState<D, M> {
    engine: Arc<Engine<D, M>>,
    sessions: InMemorySessions,
}

impl<D, M> AppState<D, M> {
    pub fn new(engine: Arc<Engine<D, M>>) -> Self {
        Self::with_sessions(engine, InMemorySessions::new())
    }

    pub fn with_sessions(engine: Arc<Engine<D, M>>, sessions: InMemorySessions) -> Self {
        AppState { engine, sessions }
    }

    pub fn sessions(&self) -> &InMemorySessions {
        &self.sessions
    }
}

/// Build an axum `Router` around the engine.
pub fn router<D, M>(engine: Arc<Engine<D, M>>) -> Router
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    router_with_state(Arc::new(AppState::new(engine)))
}

/// Like [`router`], for callers that keep a handle on the sessions.
pub fn router_with_state<D, M>(state: Arc<AppState<D, M>>) -> Router
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    Router::new()
        .route("/", get(show_handler::<D, M>).post(submit_handler::<D, M>))
        .route("/login", post(login_handler::<D, M>))
        .route("/health", get(health_handler::<D, M>))
        .with_state(state)
}

/// Serve the engine over HTTP at the given address (e.g. `"0.0.0.0:8081"`).
pub async fn serve<D, M>(engine: Arc<Engine<D, M>>, addr: &str) -> Result<(), std::io::Error>
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    serve_with_state(Arc::new(AppState::new(engine)), addr).await
}

/// Like [`serve`], with caller-built state (e.g. a custom session timeout).
pub async fn serve_with_state<D, M>(
    state: Arc<AppState<D, M>>,
    addr: &str,
) -> Result<(), std::io::Error>
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    let app = router_with_state(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}

async fn health_handler<D, M>(State(state): State<Arc<AppState<D, M>>>) -> impl IntoResponse
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    let rules = state.engine.validators().names();
    let content = state.engine.dynamic().keys();
    Json(json!({
        "ok": true,
        "lang_codes": state.engine.lang_codes(),
        "rules": rules,
        "dynamic_content": content,
    }))
}

async fn show_handler<D, M>(
    State(state): State<Arc<AppState<D, M>>>,
    connect: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Query(query): Query<Pairs>,
) -> Response
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    run(state, connect, headers, query).await
}

async fn submit_handler<D, M>(
    State(state): State<Arc<AppState<D, M>>>,
    connect: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Query(mut params): Query<Pairs>,
    Form(body): Form<Pairs>,
) -> Response
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    params.extend(body);
    run(state, connect, headers, params).await
}

async fn login_handler<D, M>(
    State(state): State<Arc<AppState<D, M>>>,
    headers: HeaderMap,
) -> Response
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    let identity = identity_from_headers(&headers);
    if let Some(field) = identity.missing_field() {
        return error_response(&state, &EngineError::Unauthorized(field));
    }
    let sid = session_id(&headers, &identity);
    match state.sessions.end(&sid) {
        Ok(ended) => {
            tracing::info!(user_id = %identity.user_id, ended, "login, session reset");
            (StatusCode::OK, Json(json!({ "ok": true }))).into_response()
        }
        Err(err) => error_response(&state, &EngineError::from(err)),
    }
}

async fn run<D, M>(
    state: Arc<AppState<D, M>>,
    connect: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    params: Pairs,
) -> Response
where
    D: DocumentStore + 'static,
    M: LockManager + 'static,
{
    let identity = identity_from_headers(&headers);
    let sid = session_id(&headers, &identity);

    let mut req = QuestRequest::from_params(params);
    if let Some(ConnectInfo(addr)) = connect {
        req.remote_addr = addr.to_string();
    }
    if let Some(ua) = headers.get(USER_AGENT).and_then(|v| v.to_str().ok()) {
        req.user_agent = ua.to_string();
    }

    // the engine blocks on the respondent lock and on file i/o
    let worker = state.clone();
    let joined = tokio::task::spawn_blocking(move || {
        let session = worker.sessions.session(&sid)?;
        let outcome = worker.engine.handle(&identity, &session, &req)?;
        let body = serde_json::to_value(outcome.view())
            .map_err(|e| StoreError::Encode(e.to_string()))?;
        Ok::<_, EngineError>(body)
    })
    .await;

    match joined {
        Ok(Ok(body)) => (StatusCode::OK, Json(body)).into_response(),
        Ok(Err(err)) => error_response(&state, &err),
        Err(join) => {
            tracing::error!(error = %join, "engine task failed");
            let body = json!({ "error": state.engine.catalog().all("request_failed", &[]) });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

fn error_response<D, M>(state: &AppState<D, M>, err: &EngineError) -> Response
where
    D: DocumentStore,
    M: LockManager,
{
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let key = match err {
        EngineError::Unauthorized(_) => "login_failed",
        _ => "request_failed",
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::warn!(error = %err, status = status.as_u16(), "request rejected");
    }
    let body = json!({ "error": state.engine.catalog().all(key, &[]) });
    (status, Json(body)).into_response()
}
