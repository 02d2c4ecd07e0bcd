//! HTTP front end for the question-answering core.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/` | Answer a question (`/api` is accepted too) |
//! | `GET`  | `/` | HTML landing page |
//! | `GET`  | `/health` | Health check with version and row counts |
//!
//! # Request
//!
//! ```json
//! { "question": "when is the midterm?", "attachments": [] }
//! ```
//!
//! `attachments` is optional and ignored.
//!
//! # Response
//!
//! ```json
//! {
//!   "answer": "Covers chapters 1-5",
//!   "source": "Forum Discussion",
//!   "title": "Midterm FAQ",
//!   "links": [{ "url": "t/123", "text": "See discussion" }]
//! }
//! ```
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "question must not be empty" } }
//! ```
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so the API can be called
//! from browser-based course tools.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use tds_assistant_core::dataset::DatasetStore;
use tds_assistant_core::models::Answer;

use crate::ask::handle;
use crate::config::Config;
use crate::store::open_store;

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    /// Datasets loaded at startup; read-only for the life of the process.
    store: Arc<DatasetStore>,
}

/// Starts the HTTP server.
///
/// Loads both datasets first, then binds to `[server].bind`. No request is
/// accepted before loading has finished. Runs until the process is
/// terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let store = Arc::new(open_store(&config.data)?);
    let app = router(store);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("TDS Assistant listening on http://{}", config.server.bind);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router over an already-loaded store.
pub fn router(store: Arc<DatasetStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/", post(handle_question))
        .route("/api", post(handle_question))
        .route("/", get(handle_landing))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(AppState { store })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    /// Machine-readable error code (e.g., `"bad_request"`).
    code: String,
    /// Human-readable error message.
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

// ============ POST /api/ ============

/// Request body for `POST /api/`.
#[derive(Debug, Deserialize)]
struct QuestionRequest {
    question: String,
    #[serde(default)]
    #[allow(dead_code)]
    attachments: Vec<serde_json::Value>,
}

async fn handle_question(
    State(state): State<AppState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Json<Answer>, AppError> {
    let Json(req) = payload.map_err(|e| bad_request(e.body_text()))?;

    if req.question.trim().is_empty() {
        return Err(bad_request("question must not be empty"));
    }

    Ok(Json(handle(&state.store, &req.question)))
}

// ============ GET / ============

const LANDING_PAGE: &str = r#"<!doctype html>
<html>
<head><title>TDS Assistant</title></head>
<body>
<h1>TDS Assistant API is Live</h1>
<p>POST to <code>/api/</code> with JSON <code>{"question": "..."}</code> to query.</p>
</body>
</html>
"#;

async fn handle_landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
    forum_rows: usize,
    timetable_rows: usize,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        forum_rows: state.store.forum().len(),
        timetable_rows: state.store.timetable().len(),
    })
}
