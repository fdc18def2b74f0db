//! HTTP routes
//!
//! | Method | Path                  | Handler            |
//! |--------|-----------------------|--------------------|
//! | GET    | `{mount}/scores`      | today's best       |
//! | POST   | `{mount}/scores`      | merge a submission |
//! | GET    | `{mount}/`            | index page         |
//! | GET    | `{mount}/index.html`  | index page         |
//!
//! Handlers only translate between HTTP and the record store; every rule
//! about the daily record lives in `daily-core`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::header;
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::get;
use axum::{Json, Router};
use daily_core::{RecordStore, Scores, ServerConfig};
use tracing::info;

use crate::decode::{DecodeError, MAX_BODY_BYTES, decode_submission};
use crate::error::ApiError;
use crate::page;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
    server: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, server: ServerConfig) -> Self {
        Self {
            store,
            server: Arc::new(server),
        }
    }
}

/// Build the router with every route mounted under the configured prefix
pub fn router(state: AppState) -> Router {
    let server = Arc::clone(&state.server);

    Router::new()
        .route(
            &server.route("/scores"),
            get(retrieve_scores).post(save_scores),
        )
        .route(&server.route("/"), get(index))
        .route(&server.route("/index.html"), get(index))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let referer = request
        .headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    info!(
        method = %request.method(),
        uri = %request.uri(),
        referer = ?referer,
        "Request"
    );

    next.run(request).await
}

async fn retrieve_scores(State(state): State<AppState>) -> Json<Scores> {
    let record = state.store.read().await;
    Json(record.scores())
}

async fn save_scores(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Scores>, ApiError> {
    let body = body.map_err(DecodeError::from_rejection)?;
    let submission = decode_submission(&body)?;

    let record = state.store.merge(submission).await;
    info!(
        score = record.score,
        moves = ?record.moves,
        pieces = ?record.pieces,
        "Saved scores"
    );

    Ok(Json(record.scores()))
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let template = page::load_template(state.server.template_path.as_deref())
        .await
        .map_err(|e| ApiError::internal("Error reading template", e))?;

    let record = state.store.read().await;
    let html = page::render(&template, &record, &state.server.mount)
        .map_err(|e| ApiError::internal("Error rendering template", e))?;

    Ok(Html(html))
}
