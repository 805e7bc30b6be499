//! HTML preview renderer.
//!
//! Produces one self-contained page: a stylesheet derived from the layout
//! table plus the document regions in reading order (letterhead, title,
//! recipient, body, attachments, signature, footer). Pure function of the
//! snapshot; rendering twice yields identical bytes.

use crate::document::classify::{classify_line, LineLevel};
use crate::document::OfficialDocument;
use crate::layout::{FontFamily, LayoutSpec};

/// Renders the document as a complete HTML page.
pub fn render_preview(document: &OfficialDocument, spec: &LayoutSpec) -> String {
    let title = escape_html(&document.title);
    let sender = escape_html(&document.sender);
    let date = escape_html(&document.date);

    let mut page = String::with_capacity(4096);
    page.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{title}</title>\n"));
    page.push_str("<style>\n");
    page.push_str(&stylesheet(spec));
    page.push_str("</style>\n</head>\n<body>\n<div class=\"page\">\n");

    // 1. Letterhead (版头)
    page.push_str("<header class=\"letterhead\">\n");
    page.push_str(&format!("<div class=\"letterhead-sender\">{sender}</div>\n"));
    page.push_str(&format!(
        "<div class=\"letterhead-reference\">{}</div>\n",
        escape_html(spec.reference_line)
    ));
    page.push_str("</header>\n");

    // 2. Title (标题)
    page.push_str(&format!("<h1 class=\"title\">{title}</h1>\n"));

    // 3. Recipient (主送机关), omitted entirely when absent
    if let Some(recipient) = document.recipient_text() {
        page.push_str(&format!(
            "<div class=\"recipient\">{}：</div>\n",
            escape_html(recipient)
        ));
    }

    // 4. Body (正文), one block per line, classified independently
    page.push_str("<div class=\"body\">\n");
    for line in document.body.split('\n') {
        let class = level_class(classify_line(line));
        if line.is_empty() {
            // Blank lines keep their 28pt slot
            page.push_str(&format!("<div class=\"body-line {class}\"></div>\n"));
        } else {
            page.push_str(&format!(
                "<div class=\"body-line {class}\">{}</div>\n",
                escape_html(line)
            ));
        }
    }
    page.push_str("</div>\n");

    // 5. Attachments (附件), omitted when absent or empty
    if let Some(line) = document.attachment_line() {
        page.push_str(&format!(
            "<div class=\"attachments\">附件：{}</div>\n",
            escape_html(&line)
        ));
    }

    // 6. Signature (发文机关署名与成文日期)
    page.push_str("<div class=\"signature\">\n<div class=\"signature-block\">\n");
    page.push_str(&format!("<div>{sender}</div>\n<div>{date}</div>\n"));
    page.push_str("</div>\n</div>\n");

    // 7. Footer (版记), screen only
    page.push_str("<footer class=\"footer no-print\">\n");
    page.push_str(&format!("<div>{}</div>\n", escape_html(spec.footer_copy_line)));
    page.push_str(&format!("<div>{}</div>\n", escape_html(spec.footer_imprint_line)));
    page.push_str("</footer>\n");

    page.push_str("</div>\n</body>\n</html>\n");
    page
}

fn level_class(level: LineLevel) -> &'static str {
    match level {
        LineLevel::H1 => "line-h1",
        LineLevel::H2 => "line-h2",
        LineLevel::Body => "line-body",
    }
}

/// Derives the page stylesheet from the layout table. Every metric in the
/// output comes from that table; the remaining rules are screen chrome.
fn stylesheet(spec: &LayoutSpec) -> String {
    let mut css = String::with_capacity(2048);

    css.push_str("* { margin: 0; padding: 0; box-sizing: border-box; }\n");
    css.push_str("body { background: #e2e8f0; padding: 24px 0; }\n");

    css.push_str(&format!(
        ".page {{ width: {width}mm; min-height: {height}mm; margin: 0 auto; background: #fff; \
         box-shadow: 0 4px 24px rgba(0, 0, 0, 0.15); \
         padding: {top}mm {right}mm {bottom}mm {left}mm; \
         display: flex; flex-direction: column; }}\n",
        width = spec.page_width_mm,
        height = spec.page_height_mm,
        top = spec.margin_top_mm,
        right = spec.margin_right_mm,
        bottom = spec.margin_bottom_mm,
        left = spec.margin_left_mm,
    ));

    css.push_str(&format!(
        ".letterhead {{ text-align: center; border-bottom: {rule}pt solid #{color}; \
         padding-bottom: 4pt; margin-bottom: {after_reference}pt; }}\n",
        rule = spec.rule_width_pt,
        color = spec.highlight_color,
        after_reference = spec.after_reference_pt,
    ));
    css.push_str(&format!(
        ".letterhead-sender {{ color: #{color}; font-weight: bold; font-family: {family}; \
         font-size: {size}pt; letter-spacing: 0.5em; line-height: 1; \
         margin-bottom: {after}pt; }}\n",
        color = spec.highlight_color,
        family = FontFamily::XiaoBiaoSong.css_stack(),
        size = spec.letterhead_size_pt,
        after = spec.after_letterhead_pt,
    ));
    css.push_str(&format!(
        ".letterhead-reference {{ color: #{color}; font-family: {family}; font-size: {size}pt; }}\n",
        color = spec.highlight_color,
        family = FontFamily::FangSong.css_stack(),
        size = spec.reference_size_pt,
    ));

    css.push_str(&format!(
        ".title {{ text-align: center; font-family: {family}; font-weight: bold; \
         font-size: {size}pt; line-height: {pitch}pt; \
         margin: {before}pt 0 {after}pt; }}\n",
        family = FontFamily::XiaoBiaoSong.css_stack(),
        size = spec.title_size_pt,
        pitch = spec.line_pitch_pt,
        before = spec.before_title_pt,
        after = spec.after_title_pt,
    ));

    css.push_str(&format!(
        ".recipient {{ font-family: {family}; font-size: {size}pt; line-height: {pitch}pt; \
         margin: {around}pt 0; }}\n",
        family = FontFamily::FangSong.css_stack(),
        size = spec.body_size_pt,
        pitch = spec.line_pitch_pt,
        around = spec.around_recipient_pt,
    ));

    css.push_str(".body { flex-grow: 1; }\n");
    css.push_str(&format!(
        ".body-line {{ font-size: {size}pt; line-height: {pitch}pt; min-height: {pitch}pt; \
         text-align: justify; text-indent: {indent}pt; margin-bottom: {after}pt; }}\n",
        size = spec.body_size_pt,
        pitch = spec.line_pitch_pt,
        indent = spec.first_line_indent_pt,
        after = spec.after_body_pt,
    ));
    css.push_str(&format!(
        ".line-h1 {{ font-family: {}; font-weight: bold; }}\n",
        spec.font_for_level(LineLevel::H1).css_stack()
    ));
    css.push_str(&format!(
        ".line-h2 {{ font-family: {}; }}\n",
        spec.font_for_level(LineLevel::H2).css_stack()
    ));
    css.push_str(&format!(
        ".line-body {{ font-family: {}; }}\n",
        spec.font_for_level(LineLevel::Body).css_stack()
    ));

    css.push_str(&format!(
        ".attachments {{ font-family: {family}; font-size: {size}pt; line-height: {pitch}pt; \
         margin-top: {before}pt; }}\n",
        family = FontFamily::FangSong.css_stack(),
        size = spec.body_size_pt,
        pitch = spec.line_pitch_pt,
        before = spec.before_attachments_pt,
    ));

    css.push_str(&format!(
        ".signature {{ margin-top: {before}pt; display: flex; flex-direction: column; \
         align-items: flex-end; }}\n",
        before = spec.before_signature_pt,
    ));
    css.push_str(&format!(
        ".signature-block {{ text-align: center; min-width: {width}pt; \
         font-family: {family}; font-size: {size}pt; line-height: {pitch}pt; }}\n",
        width = spec.signature_min_width_pt,
        family = FontFamily::FangSong.css_stack(),
        size = spec.body_size_pt,
        pitch = spec.line_pitch_pt,
    ));

    css.push_str(&format!(
        ".footer {{ margin-top: auto; padding-top: 8pt; border-top: 1pt solid #0f172a; \
         display: flex; justify-content: space-between; font-family: {family}; \
         font-size: {size}pt; opacity: 0.5; }}\n",
        family = FontFamily::FangSong.css_stack(),
        size = spec.footer_size_pt,
    ));

    css.push_str("@media print { body { background: #fff; padding: 0; } ");
    css.push_str(".page { box-shadow: none; } .no-print { display: none; } }\n");
    css.push_str("@page { size: A4; margin: 0; }\n");

    css
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_preview_is_idempotent() {
        let doc = notice_document();
        let first = render_preview(&doc, gb9704_2012());
        let second = render_preview(&doc, gb9704_2012());
        assert_eq!(first, second, "same snapshot must render identical pages");
    }

    #[test]
    fn test_preview_renders_all_regions_of_a_notice() {
        let page = render_preview(&notice_document(), gb9704_2012());

        assert!(page.contains("<div class=\"letterhead-sender\">XX局</div>"));
        assert!(page.contains("<div class=\"letterhead-reference\">〔2025〕第 XX 号</div>"));
        assert!(page.contains("<h1 class=\"title\">关于加强安全管理的通知</h1>"));
        assert!(page.contains("<div class=\"recipient\">各部门：</div>"));
        assert!(page.contains("<div class=\"body-line line-body\">请遵照执行。</div>"));
        assert!(
            !page.contains("附件："),
            "empty attachment list must render no attachment section"
        );
        assert!(page.contains("<div>XX局</div>\n<div>二〇二五年三月十日</div>"));
        assert!(page.contains("<div>抄送：相关部门</div>"));
        assert!(page.contains("<div>2025年3月10日印发</div>"));
    }

    #[test]
    fn test_preview_omits_recipient_when_absent() {
        let mut doc = notice_document();
        doc.recipient = None;
        let page = render_preview(&doc, gb9704_2012());
        assert!(!page.contains("class=\"recipient\""));

        doc.recipient = Some("  ".to_string());
        let page = render_preview(&doc, gb9704_2012());
        assert!(
            !page.contains("class=\"recipient\""),
            "blank recipient must render nothing"
        );
    }

    #[test]
    fn test_preview_renders_numbered_attachments() {
        let mut doc = notice_document();
        doc.attachments = Some(vec!["安全检查表".to_string(), "整改台账".to_string()]);
        let page = render_preview(&doc, gb9704_2012());
        assert!(page.contains("附件：1.安全检查表 2.整改台账"));
    }

    #[test]
    fn test_body_lines_carry_classified_fonts() {
        let mut doc = notice_document();
        doc.body = "一、做好基础工作\n（一）加强培训\n其他说明".to_string();
        let page = render_preview(&doc, gb9704_2012());

        assert!(page.contains("<div class=\"body-line line-h1\">一、做好基础工作</div>"));
        assert!(page.contains("<div class=\"body-line line-h2\">（一）加强培训</div>"));
        assert!(page.contains("<div class=\"body-line line-body\">其他说明</div>"));
    }

    #[test]
    fn test_blank_body_lines_keep_their_slot() {
        let mut doc = notice_document();
        doc.body = "第一段。\n\n第二段。".to_string();
        let page = render_preview(&doc, gb9704_2012());

        assert_eq!(
            page.matches("<div class=\"body-line").count(),
            3,
            "blank line keeps a block"
        );
        assert!(page.contains("<div class=\"body-line line-body\"></div>"));
    }

    #[test]
    fn test_preview_escapes_model_supplied_markup() {
        let mut doc = notice_document();
        doc.title = "<script>alert(1)</script>".to_string();
        doc.body = "A & B <b>c</b>".to_string();
        let page = render_preview(&doc, gb9704_2012());

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("A &amp; B &lt;b&gt;c&lt;/b&gt;"));
    }

    #[test]
    fn test_stylesheet_carries_page_metrics() {
        let css = stylesheet(gb9704_2012());

        assert!(css.contains("width: 210mm"));
        assert!(css.contains("min-height: 297mm"));
        assert!(css.contains("padding: 37mm 26mm 35mm 28mm"));
        assert!(css.contains("line-height: 28pt"));
        assert!(css.contains("text-indent: 32pt"));
        assert!(css.contains("border-bottom: 1.5pt solid #FF0000"));
        assert!(css.contains("font-size: 10.5pt"));
        assert!(css.contains("margin: 40pt 0 30pt"));
    }

    #[test]
    fn test_stylesheet_maps_levels_to_their_faces() {
        let css = stylesheet(gb9704_2012());
        assert!(css.contains(".line-h1 { font-family: '黑体'"));
        assert!(css.contains(".line-h2 { font-family: '楷体'"));
        assert!(css.contains(".line-body { font-family: '仿宋'"));
    }
}
