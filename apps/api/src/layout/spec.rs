//! Static layout table for GB/T 9704-2012 (党政机关公文格式).
//!
//! One process-wide table carries every page, font, spacing and color value
//! this system renders with. The preview renderer derives its stylesheet
//! from it and the export renderer derives WordprocessingML properties from
//! it, so the two outputs cannot drift apart.

use crate::document::classify::LineLevel;

/// The four font roles used across an official document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    /// 方正小标宋简体, the display face for the title and letterhead sender.
    XiaoBiaoSong,
    /// 仿宋, the working face for body text, recipient, reference line,
    /// attachments, signature and footer.
    FangSong,
    /// 黑体, first-level headings (一、), rendered bold.
    HeiTi,
    /// 楷体, second-level headings (（一）).
    KaiTi,
}

impl FontFamily {
    /// The east-asian face name written into `w:rFonts` and used verbatim
    /// in CSS stacks.
    pub fn east_asian_name(&self) -> &'static str {
        match self {
            FontFamily::XiaoBiaoSong => "方正小标宋简体",
            FontFamily::FangSong => "仿宋",
            FontFamily::HeiTi => "黑体",
            FontFamily::KaiTi => "楷体",
        }
    }

    /// CSS font-family stack with fallbacks for systems lacking the exact face.
    pub fn css_stack(&self) -> &'static str {
        match self {
            FontFamily::XiaoBiaoSong => "'方正小标宋简体', 'SimSun', serif",
            FontFamily::FangSong => "'仿宋', 'FangSong', 'STFangsong', serif",
            FontFamily::HeiTi => "'黑体', 'SimHei', sans-serif",
            FontFamily::KaiTi => "'楷体', 'KaiTi', 'STKaiti', serif",
        }
    }
}

/// Layout values for one official document page.
/// Lengths carry their unit in the field name (mm or pt).
#[derive(Debug)]
pub struct LayoutSpec {
    // Page geometry (A4)
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_top_mm: f64,
    pub margin_bottom_mm: f64,
    pub margin_left_mm: f64,
    pub margin_right_mm: f64,

    // Font size roles
    /// Letterhead sender line (the red masthead).
    pub letterhead_size_pt: f64,
    /// Letterhead reference-number line.
    pub reference_size_pt: f64,
    /// Title, 二号.
    pub title_size_pt: f64,
    /// Body, recipient, attachments and signature, 三号.
    pub body_size_pt: f64,
    /// Footer (版记).
    pub footer_size_pt: f64,

    // Line rhythm
    /// Exact (fixed) line pitch applied to every body-rhythm line.
    /// Never expressed as a multiplier.
    pub line_pitch_pt: f64,
    /// First-line indent for body paragraphs: two character widths at the
    /// body size.
    pub first_line_indent_pt: f64,

    // Letterhead
    /// Highlight color for the masthead text and rule, RRGGBB without '#'.
    pub highlight_color: &'static str,
    /// Thickness of the rule under the letterhead.
    pub rule_width_pt: f64,
    /// Reference-number placeholder line under the sender.
    pub reference_line: &'static str,

    // Vertical region spacing
    pub after_letterhead_pt: f64,
    pub after_reference_pt: f64,
    pub before_title_pt: f64,
    pub after_title_pt: f64,
    pub around_recipient_pt: f64,
    /// Zero: the exact line pitch carries the rhythm between body lines.
    pub after_body_pt: f64,
    pub before_attachments_pt: f64,
    pub before_signature_pt: f64,

    // Signature block
    /// Minimum width of the right-aligned block that centers sender and date.
    pub signature_min_width_pt: f64,

    // Footer (版记), screen preview only
    pub footer_copy_line: &'static str,
    pub footer_imprint_line: &'static str,
}

impl LayoutSpec {
    /// The font family a classified body line renders in.
    pub fn font_for_level(&self, level: LineLevel) -> FontFamily {
        match level {
            LineLevel::H1 => FontFamily::HeiTi,
            LineLevel::H2 => FontFamily::KaiTi,
            LineLevel::Body => FontFamily::FangSong,
        }
    }
}

/// GB/T 9704-2012 values: A4, 37/35/28/26 mm margins, 二号 title over 三号
/// body on a 28 pt exact line pitch.
static GB9704_2012: LayoutSpec = LayoutSpec {
    page_width_mm: 210.0,
    page_height_mm: 297.0,
    margin_top_mm: 37.0,
    margin_bottom_mm: 35.0,
    margin_left_mm: 28.0,
    margin_right_mm: 26.0,

    letterhead_size_pt: 36.0,
    reference_size_pt: 12.0,
    title_size_pt: 22.0,
    body_size_pt: 16.0,
    footer_size_pt: 10.5,

    line_pitch_pt: 28.0,
    first_line_indent_pt: 32.0,

    highlight_color: "FF0000",
    rule_width_pt: 1.5,
    reference_line: "〔2025〕第 XX 号",

    after_letterhead_pt: 10.0,
    after_reference_pt: 20.0,
    before_title_pt: 40.0,
    after_title_pt: 30.0,
    around_recipient_pt: 10.0,
    after_body_pt: 0.0,
    before_attachments_pt: 20.0,
    before_signature_pt: 40.0,

    signature_min_width_pt: 150.0,

    footer_copy_line: "抄送：相关部门",
    footer_imprint_line: "2025年3月10日印发",
};

/// Returns the process-wide GB/T 9704-2012 layout table.
pub fn gb9704_2012() -> &'static LayoutSpec {
    &GB9704_2012
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_geometry_is_a4_with_standard_margins() {
        let spec = gb9704_2012();
        assert_eq!(spec.page_width_mm, 210.0);
        assert_eq!(spec.page_height_mm, 297.0);
        assert_eq!(spec.margin_top_mm, 37.0);
        assert_eq!(spec.margin_bottom_mm, 35.0);
        assert_eq!(spec.margin_left_mm, 28.0);
        assert_eq!(spec.margin_right_mm, 26.0);
    }

    #[test]
    fn test_font_sizes_match_document_grades() {
        let spec = gb9704_2012();
        assert_eq!(spec.title_size_pt, 22.0, "title is 二号");
        assert_eq!(spec.body_size_pt, 16.0, "body is 三号");
        assert_eq!(spec.letterhead_size_pt, 36.0);
        assert_eq!(spec.reference_size_pt, 12.0);
        assert_eq!(spec.footer_size_pt, 10.5);
    }

    #[test]
    fn test_indent_is_two_characters_at_body_size() {
        let spec = gb9704_2012();
        assert_eq!(spec.first_line_indent_pt, 2.0 * spec.body_size_pt);
    }

    #[test]
    fn test_line_pitch_is_exact_28pt() {
        assert_eq!(gb9704_2012().line_pitch_pt, 28.0);
    }

    #[test]
    fn test_body_lines_carry_no_extra_spacing() {
        // The 28pt exact pitch is the only rhythm between body lines.
        assert_eq!(gb9704_2012().after_body_pt, 0.0);
    }

    #[test]
    fn test_fonts_follow_line_classification() {
        let spec = gb9704_2012();
        assert_eq!(spec.font_for_level(LineLevel::H1), FontFamily::HeiTi);
        assert_eq!(spec.font_for_level(LineLevel::H2), FontFamily::KaiTi);
        assert_eq!(spec.font_for_level(LineLevel::Body), FontFamily::FangSong);
    }

    #[test]
    fn test_letterhead_uses_red_and_one_and_a_half_point_rule() {
        let spec = gb9704_2012();
        assert_eq!(spec.highlight_color, "FF0000");
        assert_eq!(spec.rule_width_pt, 1.5);
        assert_eq!(spec.reference_line, "〔2025〕第 XX 号");
    }

    #[test]
    fn test_east_asian_names_cover_all_roles() {
        assert_eq!(FontFamily::XiaoBiaoSong.east_asian_name(), "方正小标宋简体");
        assert_eq!(FontFamily::FangSong.east_asian_name(), "仿宋");
        assert_eq!(FontFamily::HeiTi.east_asian_name(), "黑体");
        assert_eq!(FontFamily::KaiTi.east_asian_name(), "楷体");
    }

    #[test]
    fn test_css_stacks_start_with_the_exact_face() {
        for family in [
            FontFamily::XiaoBiaoSong,
            FontFamily::FangSong,
            FontFamily::HeiTi,
            FontFamily::KaiTi,
        ] {
            let stack = family.css_stack();
            assert!(
                stack.starts_with(&format!("'{}'", family.east_asian_name())),
                "stack for {family:?} must lead with the exact face, got {stack}"
            );
        }
    }
}
