//! Axum route handlers for the Document API.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::document::{DocType, OfficialDocument};
use crate::errors::AppError;
use crate::generation::generator::{generate_document, GenerateRequest};
use crate::render::{docx, preview};
use crate::state::AppState;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const NO_DOCUMENT_MESSAGE: &str = "No document has been generated yet";

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DocTypesResponse {
    pub doc_types: Vec<DocType>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/doc-types
///
/// Lists the eleven document genres for the UI selector.
pub async fn handle_doc_types() -> Json<DocTypesResponse> {
    Json(DocTypesResponse {
        doc_types: DocType::ALL.to_vec(),
    })
}

/// POST /api/v1/documents/generate
///
/// Runs the full drafting pipeline. On success the current-document slot is
/// replaced and the finished document returned; on any failure the slot is
/// left untouched.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<OfficialDocument>, AppError> {
    let drafter = state
        .drafter
        .as_deref()
        .ok_or_else(|| AppError::Configuration("GEMINI_API_KEY is not configured".to_string()))?;

    let document = generate_document(drafter, &request).await?;

    *state.document.write().await = Some(document.clone());

    Ok(Json(document))
}

/// GET /api/v1/documents/current
///
/// Returns the current document snapshot, 404 when the slot is empty.
pub async fn handle_current(
    State(state): State<AppState>,
) -> Result<Json<OfficialDocument>, AppError> {
    let snapshot = state.document.read().await.clone();
    snapshot
        .map(Json)
        .ok_or_else(|| AppError::NotFound(NO_DOCUMENT_MESSAGE.to_string()))
}

/// DELETE /api/v1/documents/current
///
/// Clears the slot. Idempotent; clearing an empty slot is not an error.
pub async fn handle_reset(State(state): State<AppState>) -> StatusCode {
    *state.document.write().await = None;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/documents/preview
///
/// Renders the current document as a self-contained HTML page.
pub async fn handle_preview(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.document.read().await.clone();
    let document = snapshot.ok_or_else(|| AppError::NotFound(NO_DOCUMENT_MESSAGE.to_string()))?;

    Ok(Html(preview::render_preview(&document, state.layout)))
}

/// GET /api/v1/documents/export
///
/// Renders the current document as a DOCX attachment.
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.document.read().await.clone();
    let document = snapshot.ok_or_else(|| AppError::NotFound(NO_DOCUMENT_MESSAGE.to_string()))?;

    let artifact = docx::export_docx(&document, state.layout)?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE));
    let disposition = attachment_disposition(&document.export_file_name());
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid disposition header: {e}")))?,
    );

    Ok((headers, Bytes::from(artifact)))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Builds a Content-Disposition value with an ASCII fallback name and the
/// UTF-8 original in the RFC 5987 `filename*` form, so Chinese titles
/// survive as download names.
fn attachment_disposition(file_name: &str) -> String {
    let encoded = percent_encode(file_name);
    format!("attachment; filename=\"gongwen.docx\"; filename*=UTF-8''{encoded}")
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn percent_encode(value: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0F) as usize] as char);
            }
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
