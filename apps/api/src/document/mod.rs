//! Document model for official documents (公文).
//!
//! `OfficialDocument` is the unit the whole system revolves around: produced
//! by one generation call, held as the current-document snapshot, consumed
//! by both renderers. Line classification lives in `classify` and is derived
//! at render time, never stored.

pub mod classify;

use serde::{Deserialize, Serialize};

/// A generated official document.
///
/// `title`, `body`, `sender` and `date` are required and non-blank in a
/// valid document; an empty required field is a generation failure upstream,
/// not a valid empty document. `recipient` and `attachments` are optional
/// and omitted from rendering when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficialDocument {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Newline-delimited body; each line is classified independently.
    pub body: String,
    /// One value reused in the letterhead and the signature block.
    pub sender: String,
    /// Localized numeral form (e.g. 二〇二五年三月十日). Rendered verbatim.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

impl OfficialDocument {
    /// The recipient to render, treating the empty string as absent (the
    /// generation model returns `""` when there is no addressee).
    pub fn recipient_text(&self) -> Option<&str> {
        self.recipient
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }

    /// The inline attachment list (`1.X 2.Y`, space-joined), or `None` when
    /// there are no attachments. Absent and empty lists behave alike. Both
    /// renderers print this after the 附件： label.
    pub fn attachment_line(&self) -> Option<String> {
        let items = self.attachments.as_deref().unwrap_or(&[]);
        if items.is_empty() {
            return None;
        }
        Some(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| format!("{}.{}", i + 1, item))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }

    /// Collapses blank optional fields to `None` after parsing, so the
    /// stored snapshot and its serialized form agree with what renders.
    pub fn normalize(mut self) -> Self {
        if self.recipient_text().is_none() {
            self.recipient = None;
        }
        if self.attachment_line().is_none() {
            self.attachments = None;
        }
        self
    }

    /// True when every required field is non-blank.
    pub fn has_required_fields(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.body.trim().is_empty()
            && !self.sender.trim().is_empty()
            && !self.date.trim().is_empty()
    }

    /// File name for the exported artifact: `{title}.docx`, falling back to
    /// 公文.docx when the title is blank.
    pub fn export_file_name(&self) -> String {
        let title = self.title.trim();
        if title.is_empty() {
            "公文.docx".to_string()
        } else {
            format!("{title}.docx")
        }
    }
}

/// The eleven supported document genres (文种). Serialized as the Chinese
/// label, which is also what the UI selector displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocType {
    #[default]
    #[serde(rename = "通知")]
    Notice,
    #[serde(rename = "报告")]
    Report,
    #[serde(rename = "决定")]
    Decision,
    #[serde(rename = "请示")]
    Request,
    #[serde(rename = "决议")]
    Resolution,
    #[serde(rename = "函")]
    Letter,
    #[serde(rename = "纪要")]
    Minutes,
    #[serde(rename = "讲话稿")]
    Speech,
    #[serde(rename = "总结")]
    Summary,
    #[serde(rename = "述职报告")]
    Debrief,
    #[serde(rename = "新闻稿")]
    News,
}

impl DocType {
    /// All genres in selector order.
    pub const ALL: [DocType; 11] = [
        DocType::Notice,
        DocType::Report,
        DocType::Decision,
        DocType::Request,
        DocType::Resolution,
        DocType::Letter,
        DocType::Minutes,
        DocType::Speech,
        DocType::Summary,
        DocType::Debrief,
        DocType::News,
    ];

    /// The Chinese label, identical to the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            DocType::Notice => "通知",
            DocType::Report => "报告",
            DocType::Decision => "决定",
            DocType::Request => "请示",
            DocType::Resolution => "决议",
            DocType::Letter => "函",
            DocType::Minutes => "纪要",
            DocType::Speech => "讲话稿",
            DocType::Summary => "总结",
            DocType::Debrief => "述职报告",
            DocType::News => "新闻稿",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> OfficialDocument {
        OfficialDocument {
            title: "关于加强安全管理的通知".to_string(),
            recipient: Some("各部门".to_string()),
            body: "请遵照执行。".to_string(),
            sender: "XX局".to_string(),
            date: "二〇二五年三月十日".to_string(),
            attachments: None,
        }
    }

    #[test]
    fn test_recipient_empty_string_treated_as_absent() {
        let mut doc = sample_document();
        doc.recipient = Some(String::new());
        assert_eq!(doc.recipient_text(), None, "empty recipient must be absent");

        doc.recipient = Some("  ".to_string());
        assert_eq!(doc.recipient_text(), None, "blank recipient must be absent");

        doc.recipient = None;
        assert_eq!(doc.recipient_text(), None);

        doc.recipient = Some("各部门".to_string());
        assert_eq!(doc.recipient_text(), Some("各部门"));
    }

    #[test]
    fn test_attachment_line_numbers_and_joins_with_spaces() {
        let mut doc = sample_document();
        doc.attachments = Some(vec!["安全检查表".to_string(), "整改台账".to_string()]);
        assert_eq!(
            doc.attachment_line().as_deref(),
            Some("1.安全检查表 2.整改台账")
        );
    }

    #[test]
    fn test_attachment_line_absent_and_empty_behave_alike() {
        let mut doc = sample_document();
        doc.attachments = None;
        assert_eq!(doc.attachment_line(), None);

        doc.attachments = Some(vec![]);
        assert_eq!(doc.attachment_line(), None, "empty list renders nothing");
    }

    #[test]
    fn test_normalize_collapses_blank_optionals() {
        let mut doc = sample_document();
        doc.recipient = Some(String::new());
        doc.attachments = Some(vec![]);

        let doc = doc.normalize();
        assert!(doc.recipient.is_none());
        assert!(doc.attachments.is_none());
    }

    #[test]
    fn test_normalize_keeps_populated_optionals() {
        let mut doc = sample_document();
        doc.attachments = Some(vec!["附表".to_string()]);

        let doc = doc.normalize();
        assert_eq!(doc.recipient.as_deref(), Some("各部门"));
        assert_eq!(doc.attachments.as_deref(), Some(&["附表".to_string()][..]));
    }

    #[test]
    fn test_required_fields_check_rejects_blank_body() {
        let mut doc = sample_document();
        assert!(doc.has_required_fields());

        doc.body = "  ".to_string();
        assert!(!doc.has_required_fields(), "blank body is not a valid document");
    }

    #[test]
    fn test_export_file_name_uses_title() {
        let doc = sample_document();
        assert_eq!(doc.export_file_name(), "关于加强安全管理的通知.docx");
    }

    #[test]
    fn test_export_file_name_falls_back_when_title_blank() {
        let mut doc = sample_document();
        doc.title = String::new();
        assert_eq!(doc.export_file_name(), "公文.docx");
    }

    #[test]
    fn test_deserializes_from_model_response_without_optionals() {
        let json = r#"{
            "title": "关于开展年度考核的通知",
            "body": "现将有关事项通知如下。",
            "sender": "人事处",
            "date": "二〇二五年三月十日"
        }"#;
        let doc: OfficialDocument = serde_json::from_str(json).unwrap();
        assert!(doc.recipient.is_none());
        assert!(doc.attachments.is_none());
        assert!(doc.has_required_fields());
    }

    #[test]
    fn test_doc_type_serializes_to_chinese_label() {
        let json = serde_json::to_string(&DocType::Request).unwrap();
        assert_eq!(json, "\"请示\"");

        let parsed: DocType = serde_json::from_str("\"述职报告\"").unwrap();
        assert_eq!(parsed, DocType::Debrief);
    }

    #[test]
    fn test_doc_type_lists_all_eleven_genres_in_order() {
        let labels: Vec<&str> = DocType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            vec![
                "通知", "报告", "决定", "请示", "决议", "函", "纪要", "讲话稿", "总结",
                "述职报告", "新闻稿"
            ]
        );
    }

    #[test]
    fn test_doc_type_defaults_to_notice() {
        assert_eq!(DocType::default(), DocType::Notice);
    }
}
