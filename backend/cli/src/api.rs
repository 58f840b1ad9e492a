use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::warn;

use placefinder_core::{PlacefinderError, UploadLimits};
use placefinder_markdown::{format, Renderer};
use placefinder_media::sniff_image_mime;
use placefinder_session::{AnalysisController, PageState, PageView};

use crate::page::render_page;

/// Headroom above the upload cap so oversized images still reach validation
/// and get a JSON answer instead of a bare 413.
const BODY_LIMIT_HEADROOM: u64 = 1024 * 1024;

/// Shared application state for API handlers.
pub struct AppState {
    pub controller: AnalysisController,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = body_limit(state.controller.limits());
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route("/api/state", get(get_state))
        .route("/api/analyze", post(analyze))
        .route("/api/reanalyze", post(reanalyze))
        .route("/api/format", post(format_text))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn body_limit(limits: &UploadLimits) -> usize {
    usize::try_from(limits.max_bytes.saturating_add(BODY_LIMIT_HEADROOM)).unwrap_or(usize::MAX)
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "placefinder",
        "version": env!("CARGO_PKG_VERSION"),
        "analyzer": state.controller.analyzer_name(),
    }))
}

/// The landing page, rendered from the current state.
async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let page = state.controller.snapshot().await;
    Html(render_page(&page, state.controller.limits()))
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<PageView> {
    Json(state.controller.snapshot().await.view())
}

/// Accept a raw image body; the `Content-Type` header carries its MIME type.
async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let declared = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");
    let mime = if declared.starts_with("application/octet-stream") {
        sniff_image_mime(&body).unwrap_or(declared)
    } else {
        declared
    };

    let mime = mime.to_string();
    match state.controller.upload_bytes("upload", &mime, body).await {
        Ok(page) => analysis_response(&page),
        Err(e) => error_response(&e),
    }
}

async fn reanalyze(State(state): State<Arc<AppState>>) -> Response {
    match state.controller.reanalyze().await {
        Ok(page) => analysis_response(&page),
        Err(e) => error_response(&e),
    }
}

/// Format analysis text without calling any analyzer.
async fn format_text(body: String) -> Json<Value> {
    let blocks = format(&body);
    let html = Renderer::to_html(&blocks);
    Json(json!({ "blocks": blocks, "html": html }))
}

fn analysis_response(page: &PageState) -> Response {
    let blocks = page.blocks();
    let html = Renderer::to_html(&blocks);
    Json(json!({
        "blocks": blocks,
        "html": html,
        "loading": page.loading,
        "error": page.error,
        "generation": page.generation,
    }))
    .into_response()
}

fn error_response(error: &PlacefinderError) -> Response {
    let status = match error {
        PlacefinderError::InvalidFileType { .. } | PlacefinderError::FileReadError(_) => StatusCode::BAD_REQUEST,
        PlacefinderError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        PlacefinderError::AnalysisServiceError(_) => StatusCode::BAD_GATEWAY,
        PlacefinderError::DefaultAssetLoadError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(status = status.as_u16(), kind = error.kind(), error = %error, "Request failed");
    (
        status,
        Json(json!({ "error": error.user_message(), "kind": error.kind() })),
    )
        .into_response()
}
