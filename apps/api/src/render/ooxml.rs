//! Minimal WordprocessingML writer.
//!
//! Builds the three-part OOXML package ([Content_Types].xml, _rels/.rels,
//! word/document.xml) by explicit event writing. Only the constructs this
//! system renders are modelled. Child order inside w:pPr and w:rPr follows
//! the schema sequence; Word rejects parts that reorder them.

use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::FileOptions;
use zip::ZipWriter;

pub const WORDPROCESSINGML_NS: &str =
    "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

// ────────────────────────────────────────────────────────────────────────────
// Unit conversions
// ────────────────────────────────────────────────────────────────────────────

/// 1 mm = 56.7 twips.
pub fn mm_to_twip(mm: f64) -> u32 {
    (mm * 56.7).round() as u32
}

/// 1 pt = 20 twips.
pub fn pt_to_twip(pt: f64) -> u32 {
    (pt * 20.0).round() as u32
}

/// Run sizes (w:sz) are half-points.
pub fn pt_to_half_point(pt: f64) -> u32 {
    (pt * 2.0).round() as u32
}

/// Border widths (w:sz on a border) are eighth-points.
pub fn pt_to_eighth_point(pt: f64) -> u32 {
    (pt * 8.0).round() as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Document model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Center,
    Justified,
    Right,
}

impl Alignment {
    fn value(self) -> &'static str {
        match self {
            Alignment::Center => "center",
            // WordprocessingML calls full justification "both"
            Alignment::Justified => "both",
            Alignment::Right => "right",
        }
    }
}

/// One styled run of text.
#[derive(Debug, Clone)]
pub struct Run {
    pub text: String,
    pub font: &'static str,
    pub size_half_points: u32,
    pub bold: bool,
    pub color: Option<&'static str>,
}

#[derive(Debug, Clone, Copy)]
pub struct BottomBorder {
    pub color: &'static str,
    pub width_eighth_points: u32,
}

/// One paragraph. Unset properties are omitted from the part, so a
/// default paragraph with only `line_exact_twips` renders as an empty
/// line that still occupies its slot.
#[derive(Debug, Clone, Default)]
pub struct Paragraph {
    pub alignment: Option<Alignment>,
    pub spacing_before_twips: Option<u32>,
    pub spacing_after_twips: Option<u32>,
    pub line_exact_twips: Option<u32>,
    pub first_line_indent_twips: Option<u32>,
    pub bottom_border: Option<BottomBorder>,
    pub runs: Vec<Run>,
}

/// Page geometry for the single section, all in twips.
#[derive(Debug, Clone, Copy)]
pub struct PageSetup {
    pub width_twips: u32,
    pub height_twips: u32,
    pub margin_top_twips: u32,
    pub margin_right_twips: u32,
    pub margin_bottom_twips: u32,
    pub margin_left_twips: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Part writing
// ────────────────────────────────────────────────────────────────────────────

/// Serializes the paragraphs and page setup into word/document.xml.
pub fn build_document_xml(paragraphs: &[Paragraph], page: &PageSetup) -> anyhow::Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

    let mut document = BytesStart::new("w:document");
    document.push_attribute(("xmlns:w", WORDPROCESSINGML_NS));
    writer.write_event(Event::Start(document))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for paragraph in paragraphs {
        write_paragraph(&mut writer, paragraph)?;
    }

    write_sect_pr(&mut writer, page)?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

fn write_paragraph(writer: &mut Writer<Vec<u8>>, paragraph: &Paragraph) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:p")))?;

    let has_properties = paragraph.alignment.is_some()
        || paragraph.spacing_before_twips.is_some()
        || paragraph.spacing_after_twips.is_some()
        || paragraph.line_exact_twips.is_some()
        || paragraph.first_line_indent_twips.is_some()
        || paragraph.bottom_border.is_some();

    if has_properties {
        writer.write_event(Event::Start(BytesStart::new("w:pPr")))?;

        // Schema order: pBdr, spacing, ind, jc
        if let Some(border) = paragraph.bottom_border {
            writer.write_event(Event::Start(BytesStart::new("w:pBdr")))?;
            let mut bottom = BytesStart::new("w:bottom");
            bottom.push_attribute(("w:val", "single"));
            bottom.push_attribute(("w:sz", border.width_eighth_points.to_string().as_str()));
            bottom.push_attribute(("w:space", "1"));
            bottom.push_attribute(("w:color", border.color));
            writer.write_event(Event::Empty(bottom))?;
            writer.write_event(Event::End(BytesEnd::new("w:pBdr")))?;
        }

        if paragraph.spacing_before_twips.is_some()
            || paragraph.spacing_after_twips.is_some()
            || paragraph.line_exact_twips.is_some()
        {
            let mut spacing = BytesStart::new("w:spacing");
            if let Some(before) = paragraph.spacing_before_twips {
                spacing.push_attribute(("w:before", before.to_string().as_str()));
            }
            if let Some(after) = paragraph.spacing_after_twips {
                spacing.push_attribute(("w:after", after.to_string().as_str()));
            }
            if let Some(line) = paragraph.line_exact_twips {
                spacing.push_attribute(("w:line", line.to_string().as_str()));
                spacing.push_attribute(("w:lineRule", "exact"));
            }
            writer.write_event(Event::Empty(spacing))?;
        }

        if let Some(indent) = paragraph.first_line_indent_twips {
            let mut ind = BytesStart::new("w:ind");
            ind.push_attribute(("w:firstLine", indent.to_string().as_str()));
            writer.write_event(Event::Empty(ind))?;
        }

        if let Some(alignment) = paragraph.alignment {
            let mut jc = BytesStart::new("w:jc");
            jc.push_attribute(("w:val", alignment.value()));
            writer.write_event(Event::Empty(jc))?;
        }

        writer.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    }

    for run in &paragraph.runs {
        write_run(writer, run)?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_run(writer: &mut Writer<Vec<u8>>, run: &Run) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

    // Schema order: rFonts, b, color, sz, szCs
    let mut fonts = BytesStart::new("w:rFonts");
    fonts.push_attribute(("w:ascii", run.font));
    fonts.push_attribute(("w:eastAsia", run.font));
    fonts.push_attribute(("w:hAnsi", run.font));
    writer.write_event(Event::Empty(fonts))?;

    if run.bold {
        writer.write_event(Event::Empty(BytesStart::new("w:b")))?;
    }
    if let Some(color) = run.color {
        let mut element = BytesStart::new("w:color");
        element.push_attribute(("w:val", color));
        writer.write_event(Event::Empty(element))?;
    }

    let size = run.size_half_points.to_string();
    let mut sz = BytesStart::new("w:sz");
    sz.push_attribute(("w:val", size.as_str()));
    writer.write_event(Event::Empty(sz))?;
    let mut sz_cs = BytesStart::new("w:szCs");
    sz_cs.push_attribute(("w:val", size.as_str()));
    writer.write_event(Event::Empty(sz_cs))?;

    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;

    // xml:space keeps leading and trailing spaces in the run
    let mut text = BytesStart::new("w:t");
    text.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(text))?;
    writer.write_event(Event::Text(BytesText::new(&run.text)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn write_sect_pr(writer: &mut Writer<Vec<u8>>, page: &PageSetup) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;

    let mut size = BytesStart::new("w:pgSz");
    size.push_attribute(("w:w", page.width_twips.to_string().as_str()));
    size.push_attribute(("w:h", page.height_twips.to_string().as_str()));
    writer.write_event(Event::Empty(size))?;

    // CT_PageMar requires all seven attributes
    let mut margins = BytesStart::new("w:pgMar");
    margins.push_attribute(("w:top", page.margin_top_twips.to_string().as_str()));
    margins.push_attribute(("w:right", page.margin_right_twips.to_string().as_str()));
    margins.push_attribute(("w:bottom", page.margin_bottom_twips.to_string().as_str()));
    margins.push_attribute(("w:left", page.margin_left_twips.to_string().as_str()));
    margins.push_attribute(("w:header", "708"));
    margins.push_attribute(("w:footer", "708"));
    margins.push_attribute(("w:gutter", "0"));
    writer.write_event(Event::Empty(margins))?;

    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Packaging
// ────────────────────────────────────────────────────────────────────────────

const CONTENT_TYPES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#
);

const ROOT_RELS_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

/// Wraps the document part in the minimal three-part OOXML package.
pub fn package_docx(document_xml: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();

    archive.start_file("[Content_Types].xml", options)?;
    archive.write_all(CONTENT_TYPES_XML.as_bytes())?;

    archive.start_file("_rels/.rels", options)?;
    archive.write_all(ROOT_RELS_XML.as_bytes())?;

    archive.start_file("word/document.xml", options)?;
    archive.write_all(document_xml)?;

    Ok(archive.finish()?.into_inner())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
