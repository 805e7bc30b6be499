//! DOCX export renderer.
//!
//! Maps the document regions onto WordprocessingML paragraphs using the
//! same layout table and line classifier as the preview, then wraps the
//! part in the OOXML package. Pure function of the snapshot; the artifact
//! is byte-for-byte reproducible.

use crate::document::classify::{classify_line, LineLevel};
use crate::document::OfficialDocument;
use crate::errors::AppError;
use crate::layout::{FontFamily, LayoutSpec};
use crate::render::ooxml::{
    build_document_xml, mm_to_twip, package_docx, pt_to_eighth_point, pt_to_half_point,
    pt_to_twip, Alignment, BottomBorder, PageSetup, Paragraph, Run,
};

/// Renders the document as a complete DOCX artifact.
pub fn export_docx(document: &OfficialDocument, spec: &LayoutSpec) -> Result<Vec<u8>, AppError> {
    let paragraphs = document_paragraphs(document, spec);
    let xml = build_document_xml(&paragraphs, &page_setup(spec)).map_err(AppError::Internal)?;
    package_docx(&xml).map_err(AppError::Internal)
}

fn page_setup(spec: &LayoutSpec) -> PageSetup {
    PageSetup {
        width_twips: mm_to_twip(spec.page_width_mm),
        height_twips: mm_to_twip(spec.page_height_mm),
        margin_top_twips: mm_to_twip(spec.margin_top_mm),
        margin_right_twips: mm_to_twip(spec.margin_right_mm),
        margin_bottom_twips: mm_to_twip(spec.margin_bottom_mm),
        margin_left_twips: mm_to_twip(spec.margin_left_mm),
    }
}

/// Lays the document regions out in reading order. The footer (版记) is a
/// screen affordance and is not exported.
fn document_paragraphs(document: &OfficialDocument, spec: &LayoutSpec) -> Vec<Paragraph> {
    let line = pt_to_twip(spec.line_pitch_pt);
    let body_size = pt_to_half_point(spec.body_size_pt);
    let fang_song = FontFamily::FangSong.east_asian_name();

    let mut paragraphs = Vec::new();

    // 1. Letterhead sender (红头)
    paragraphs.push(Paragraph {
        alignment: Some(Alignment::Center),
        spacing_after_twips: Some(pt_to_twip(spec.after_letterhead_pt)),
        runs: vec![Run {
            text: document.sender.clone(),
            font: FontFamily::XiaoBiaoSong.east_asian_name(),
            size_half_points: pt_to_half_point(spec.letterhead_size_pt),
            bold: true,
            color: Some(spec.highlight_color),
        }],
        ..Paragraph::default()
    });

    // 2. Reference line, closed by the red rule
    paragraphs.push(Paragraph {
        alignment: Some(Alignment::Center),
        spacing_after_twips: Some(pt_to_twip(spec.after_reference_pt)),
        bottom_border: Some(BottomBorder {
            color: spec.highlight_color,
            width_eighth_points: pt_to_eighth_point(spec.rule_width_pt),
        }),
        runs: vec![Run {
            text: spec.reference_line.to_string(),
            font: fang_song,
            size_half_points: pt_to_half_point(spec.reference_size_pt),
            bold: false,
            color: Some(spec.highlight_color),
        }],
        ..Paragraph::default()
    });

    // 3. Title (标题)
    paragraphs.push(Paragraph {
        alignment: Some(Alignment::Center),
        spacing_before_twips: Some(pt_to_twip(spec.before_title_pt)),
        spacing_after_twips: Some(pt_to_twip(spec.after_title_pt)),
        line_exact_twips: Some(line),
        runs: vec![Run {
            text: document.title.clone(),
            font: FontFamily::XiaoBiaoSong.east_asian_name(),
            size_half_points: pt_to_half_point(spec.title_size_pt),
            bold: true,
            color: None,
        }],
        ..Paragraph::default()
    });

    // 4. Recipient (主送机关), omitted entirely when absent
    if let Some(recipient) = document.recipient_text() {
        let around = pt_to_twip(spec.around_recipient_pt);
        paragraphs.push(Paragraph {
            spacing_before_twips: Some(around),
            spacing_after_twips: Some(around),
            line_exact_twips: Some(line),
            runs: vec![Run {
                text: format!("{recipient}："),
                font: fang_song,
                size_half_points: body_size,
                bold: false,
                color: None,
            }],
            ..Paragraph::default()
        });
    }

    // 5. Body (正文), one paragraph per line
    for text_line in document.body.split('\n') {
        if text_line.trim().is_empty() {
            // Blank lines keep their slot on the 28pt grid
            paragraphs.push(Paragraph {
                line_exact_twips: Some(line),
                ..Paragraph::default()
            });
            continue;
        }

        let level = classify_line(text_line);
        paragraphs.push(Paragraph {
            alignment: Some(Alignment::Justified),
            spacing_after_twips: Some(pt_to_twip(spec.after_body_pt)),
            line_exact_twips: Some(line),
            first_line_indent_twips: Some(pt_to_twip(spec.first_line_indent_pt)),
            runs: vec![Run {
                text: text_line.to_string(),
                font: spec.font_for_level(level).east_asian_name(),
                size_half_points: body_size,
                bold: level == LineLevel::H1,
                color: None,
            }],
            ..Paragraph::default()
        });
    }

    // 6. Attachments (附件), omitted when absent or empty
    if let Some(attachment_line) = document.attachment_line() {
        paragraphs.push(Paragraph {
            spacing_before_twips: Some(pt_to_twip(spec.before_attachments_pt)),
            line_exact_twips: Some(line),
            runs: vec![Run {
                text: format!("附件：{attachment_line}"),
                font: fang_song,
                size_half_points: body_size,
                bold: false,
                color: None,
            }],
            ..Paragraph::default()
        });
    }

    // 7. Signature (署名与成文日期), two right-aligned paragraphs
    paragraphs.push(Paragraph {
        alignment: Some(Alignment::Right),
        spacing_before_twips: Some(pt_to_twip(spec.before_signature_pt)),
        line_exact_twips: Some(line),
        runs: vec![Run {
            text: document.sender.clone(),
            font: fang_song,
            size_half_points: body_size,
            bold: false,
            color: None,
        }],
        ..Paragraph::default()
    });
    paragraphs.push(Paragraph {
        alignment: Some(Alignment::Right),
        line_exact_twips: Some(line),
        runs: vec![Run {
            text: document.date.clone(),
            font: fang_song,
            size_half_points: body_size,
            bold: false,
            color: None,
        }],
        ..Paragraph::default()
    });

    paragraphs
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read, Write};

    use crate::layout::gb9704_2012;

    fn notice_document() -> OfficialDocument {
        OfficialDocument {
            title: "关于加强安全管理的通知".to_string(),
            recipient: Some("各部门".to_string()),
            body: "请遵照执行。".to_string(),
            sender: "XX局".to_string(),
            date: "二〇二五年三月十日".to_string(),
            attachments: Some(vec![]),
        }
    }

    fn extract_document_xml(artifact: Vec<u8>) -> String {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(artifact)).expect("artifact is a readable ZIP");
        let mut part = archive.by_name("word/document.xml").expect("document part");
        let mut xml = String::new();
        part.read_to_string(&mut xml).expect("part is valid UTF-8");
        xml
    }

    fn notice_xml() -> String {
        let artifact =
            export_docx(&notice_document(), gb9704_2012()).expect("export succeeds");
        extract_document_xml(artifact)
    }

    #[test]
    fn test_artifact_starts_with_zip_magic() {
        let artifact = export_docx(&notice_document(), gb9704_2012()).expect("export succeeds");
        assert_eq!(&artifact[..4], b"PK\x03\x04");
    }

    #[test]
    fn test_export_is_byte_deterministic() {
        let doc = notice_document();
        let first = export_docx(&doc, gb9704_2012()).expect("export succeeds");
        let second = export_docx(&doc, gb9704_2012()).expect("export succeeds");
        assert_eq!(first, second, "same snapshot must export identical bytes");
    }

    #[test]
    fn test_document_part_carries_standard_page_geometry() {
        let xml = notice_xml();
        assert!(xml.contains(r#"<w:pgSz w:w="11907" w:h="16840"/>"#));
        assert!(xml.contains(
            r#"<w:pgMar w:top="2098" w:right="1474" w:bottom="1985" w:left="1588" w:header="708" w:footer="708" w:gutter="0"/>"#
        ));
    }

    #[test]
    fn test_notice_renders_regions_in_reading_order() {
        let xml = notice_xml();

        // Letterhead: bold red 36pt display face
        assert!(xml.contains(
            r#"<w:rFonts w:ascii="方正小标宋简体" w:eastAsia="方正小标宋简体" w:hAnsi="方正小标宋简体"/><w:b/><w:color w:val="FF0000"/><w:sz w:val="72"/>"#
        ));
        // Reference line closed by the 1.5pt red rule
        assert!(xml.contains(r#"<w:bottom w:val="single" w:sz="12" w:space="1" w:color="FF0000"/>"#));
        assert!(xml.contains("〔2025〕第 XX 号"));
        // Title at 22pt
        assert!(xml.contains(r#"<w:sz w:val="44"/>"#));
        // Recipient line with the full-width colon
        assert!(xml.contains(r#"<w:t xml:space="preserve">各部门：</w:t>"#));
        // Body justified on the exact 28pt grid with a 2-character indent
        assert!(xml.contains(r#"<w:jc w:val="both"/>"#));
        assert!(xml.contains(r#"<w:ind w:firstLine="640"/>"#));
        assert!(xml.contains(r#"w:line="560" w:lineRule="exact""#));
        // Empty attachment list renders no section
        assert!(!xml.contains("附件："));
        // Signature: sender then date, right aligned
        assert!(xml.contains(r#"<w:jc w:val="right"/>"#));

        let letterhead = xml.find("XX局").expect("letterhead sender");
        let title = xml.find("关于加强安全管理的通知").expect("title");
        let recipient = xml.find("各部门：").expect("recipient");
        let body = xml.find("请遵照执行。").expect("body");
        let date = xml.find("二〇二五年三月十日").expect("date");
        assert!(
            letterhead < title && title < recipient && recipient < body && body < date,
            "regions must appear in reading order"
        );

        assert_eq!(
            xml.matches("XX局").count(),
            2,
            "sender appears in letterhead and signature"
        );
    }

    #[test]
    fn test_heading_lines_render_in_their_faces() {
        let mut doc = notice_document();
        doc.body = "一、做好基础工作\n（一）加强培训\n其他说明".to_string();
        let artifact = export_docx(&doc, gb9704_2012()).expect("export succeeds");
        let xml = extract_document_xml(artifact);

        assert!(xml.contains(
            r#"<w:rFonts w:ascii="黑体" w:eastAsia="黑体" w:hAnsi="黑体"/><w:b/>"#
        ));
        assert!(xml.contains(r#"<w:rFonts w:ascii="楷体" w:eastAsia="楷体" w:hAnsi="楷体"/><w:sz"#));
        assert!(xml.contains(r#"<w:rFonts w:ascii="仿宋" w:eastAsia="仿宋" w:hAnsi="仿宋"/><w:sz"#));
    }

    #[test]
    fn test_attachments_render_as_one_numbered_line() {
        let mut doc = notice_document();
        doc.attachments = Some(vec!["安全检查表".to_string(), "整改台账".to_string()]);
        let artifact = export_docx(&doc, gb9704_2012()).expect("export succeeds");
        let xml = extract_document_xml(artifact);

        assert!(xml.contains(
            r#"<w:t xml:space="preserve">附件：1.安全检查表 2.整改台账</w:t>"#
        ));
    }

    #[test]
    fn test_blank_body_line_keeps_its_slot() {
        let mut doc = notice_document();
        doc.body = "第一段。\n\n第二段。".to_string();
        let artifact = export_docx(&doc, gb9704_2012()).expect("export succeeds");
        let xml = extract_document_xml(artifact);

        assert!(xml.contains(
            r#"<w:p><w:pPr><w:spacing w:line="560" w:lineRule="exact"/></w:pPr></w:p>"#
        ));
    }

    #[test]
    fn test_omitted_recipient_renders_no_line() {
        let mut doc = notice_document();
        doc.recipient = None;
        let artifact = export_docx(&doc, gb9704_2012()).expect("export succeeds");
        let xml = extract_document_xml(artifact);
        assert!(!xml.contains("各部门"), "absent recipient renders nothing");
        assert!(!xml.contains("："), "no full-width colon without a recipient");
    }

    #[test]
    fn test_artifact_round_trips_through_disk() {
        let artifact = export_docx(&notice_document(), gb9704_2012()).expect("export succeeds");

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(&artifact).expect("write artifact");
        let path = file.into_temp_path();

        let reopened = std::fs::File::open(&path).expect("reopen artifact");
        let mut archive = zip::ZipArchive::new(reopened).expect("saved artifact is a valid ZIP");
        archive.by_name("word/document.xml").expect("document part");
    }
}
