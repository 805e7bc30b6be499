//! Document generation: orchestrates the drafting pipeline.
//!
//! Flow: validate → assemble_brief → drafter.draft → normalize →
//!       required-field check → return document.
//!
//! One model call per invocation, no retry. The handler owns the
//! current-document slot; this module never touches it, so a failed call
//! cannot clobber a previously generated document.

use chrono::Local;
use serde::Deserialize;
use tracing::info;

use crate::document::{DocType, OfficialDocument};
use crate::errors::AppError;
use crate::generation::drafter::DocumentDrafter;
use crate::llm_client::LlmError;

/// Returned when both content fields are blank. No model call is made.
pub const EMPTY_FIELDS_MESSAGE: &str = "请填写公文的核心内容或事由。";
/// Surfaced when the model reply cannot be parsed as a document.
pub const PARSE_FAILURE_MESSAGE: &str = "生成文档格式解析失败";
/// Surfaced when the parsed document is missing a required field.
pub const MISSING_FIELDS_MESSAGE: &str = "模型返回的公文缺少必填字段";

const DEFAULT_SENDER: &str = "默认单位";
const DEFAULT_RECIPIENT: &str = "各相关部门";
const DEFAULT_REFERENCE: &str = "无";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for document generation. Fields map one-to-one to the
/// form inputs; only rationale/key_points carry content, the rest are
/// metadata with fallbacks.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub doc_type: DocType,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub recipient: String,
    /// ISO date from the form. Defaults to today when omitted.
    pub date: Option<String>,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub key_points: String,
    pub reference: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Rejects requests where both content fields are blank.
pub fn validate(request: &GenerateRequest) -> Result<(), AppError> {
    if request.rationale.trim().is_empty() && request.key_points.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_FIELDS_MESSAGE.to_string()));
    }
    Ok(())
}

/// Assembles the labelled Chinese brief sent to the drafter.
/// Blank sender/recipient/reference fall back to neutral placeholders so
/// the model never sees an unlabelled blank.
pub fn assemble_brief(request: &GenerateRequest) -> String {
    let sender = field_or(&request.sender, DEFAULT_SENDER);
    let recipient = field_or(&request.recipient, DEFAULT_RECIPIENT);
    let reference = field_or(request.reference.as_deref().unwrap_or(""), DEFAULT_REFERENCE);
    let date = match request.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(given) => given.to_string(),
        None => Local::now().format("%Y-%m-%d").to_string(),
    };

    format!(
        "风格要求：严格遵循公文“短、实、新”原则（短小精悍、务实管用、观点新颖）。\n\
         文种：{doc_type}\n\
         发文单位：{sender}\n\
         主送机关：{recipient}\n\
         成文日期：{date}\n\
         核心事由/背景：{rationale}\n\
         关键要求/要点：{key_points}\n\
         参考文件内容：{reference}",
        doc_type = request.doc_type.label(),
        rationale = request.rationale.trim(),
        key_points = request.key_points.trim(),
    )
}

fn field_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

/// Runs the full drafting pipeline and returns the finished document.
///
/// Steps:
/// 1. validate(): blank content short-circuits before any model call
/// 2. assemble_brief() → labelled Chinese brief
/// 3. drafter.draft(): exactly one call, no retry
/// 4. normalize(): blank recipient/attachments collapse to None
/// 5. required-field check on title/body/sender/date
pub async fn generate_document(
    drafter: &dyn DocumentDrafter,
    request: &GenerateRequest,
) -> Result<OfficialDocument, AppError> {
    validate(request)?;

    let brief = assemble_brief(request);
    info!("Drafting {} document", request.doc_type.label());

    let document = drafter.draft(&brief).await.map_err(|e| match e {
        LlmError::Parse(_) => AppError::Parse(PARSE_FAILURE_MESSAGE.to_string()),
        other => AppError::Generation(other.to_string()),
    })?;

    let document = document.normalize();
    if !document.has_required_fields() {
        return Err(AppError::Parse(MISSING_FIELDS_MESSAGE.to_string()));
    }

    info!("Draft complete: {}", document.title);
    Ok(document)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
