//! Document Exporter — converts normalized text into a downloadable `.docx`.
//!
//! A `.docx` is a ZIP archive with three required parts; the document body
//! is WordprocessingML. Line classification follows the export heuristic:
//! blank lines are dropped, a short all-caps line becomes a bold standalone
//! paragraph, everything else is an ordinary paragraph in original order.
//! The heuristic misclassifies short all-caps prose (acronym lines) as
//! headings; that is a documented limitation of the format, kept as is.

use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Title paragraph every exported document opens with.
const DOCUMENT_TITLE: &str = "Tailored Resume & Strategy";

/// A heading line must be shorter than this many characters after trimming.
const MAX_HEADING_LEN: usize = 60;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Builds the `.docx` bytes for the given (already normalized) text.
pub fn build_docx(text: &str) -> Result<Vec<u8>> {
    let document_xml = build_document_xml(text);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    zip.start_file("[Content_Types].xml", options)
        .context("Failed to start [Content_Types].xml")?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", options)
        .context("Failed to start _rels/.rels")?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.start_file("word/document.xml", options)
        .context("Failed to start word/document.xml")?;
    zip.write_all(document_xml.as_bytes())?;

    let cursor = zip.finish().context("Failed to finalize docx archive")?;
    Ok(cursor.into_inner())
}

/// Renders the WordprocessingML body: title, then one paragraph per
/// non-blank input line.
fn build_document_xml(text: &str) -> String {
    let mut body = String::new();
    body.push_str(&title_paragraph(DOCUMENT_TITLE));

    for line in text.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_heading_line(line) {
            body.push_str(&bold_paragraph(line));
        } else {
            body.push_str(&plain_paragraph(line));
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    )
}

/// A trimmed line renders as a bold heading when it is entirely upper-case
/// (at least one cased character, none lower-case) and short.
fn is_heading_line(trimmed: &str) -> bool {
    trimmed.chars().count() < MAX_HEADING_LEN
        && trimmed.chars().any(|c| c.is_uppercase())
        && !trimmed.chars().any(|c| c.is_lowercase())
}

fn title_paragraph(text: &str) -> String {
    format!(
        "<w:p><w:pPr><w:rPr><w:b/><w:sz w:val=\"40\"/></w:rPr></w:pPr><w:r><w:rPr><w:b/><w:sz w:val=\"40\"/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        xml_escape(text)
    )
}

fn bold_paragraph(text: &str) -> String {
    format!(
        "<w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        xml_escape(text)
    )
}

fn plain_paragraph(text: &str) -> String {
    format!(
        "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
        xml_escape(text)
    )
}

fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
