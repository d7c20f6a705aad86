//! DOCX extractor with a fallback chain.
//!
//! Word files produced by different editors vary a lot, so extraction tries
//! progressively cruder methods until one yields enough text:
//!
//! 1. structured: docx-rs paragraphs, tables, headers and footers
//! 2. raw text: paragraph-aware walk of `word/document.xml`
//! 3. xml nodes: every `w:t` node joined by spaces
//!
//! If none of them clears the minimum length the result carries no text and
//! "failed" metadata.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use zip::ZipArchive;

use super::ExtractedContent;
use crate::error::{DocentError, Result};
use crate::models::DocumentMetadata;
use crate::processing::text::clean_text;

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxExtractor;

struct StructuredText {
    text: String,
    paragraphs: usize,
    tables: usize,
}

impl DocxExtractor {
    /// Never fails; a file nothing could be read from comes back without text.
    pub fn extract(bytes: &[u8], file_size: u64, min_chars: usize) -> ExtractedContent {
        match Self::extract_structured(bytes) {
            Ok(structured) if structured.text.chars().count() > min_chars => {
                return ExtractedContent::with_text(
                    structured.text,
                    DocumentMetadata {
                        file_type: "Word Document".to_string(),
                        file_size,
                        extraction_method: "docx-rs".to_string(),
                        paragraphs: Some(structured.paragraphs),
                        tables: Some(structured.tables),
                        ..Default::default()
                    },
                );
            }
            Ok(_) => tracing::debug!("Structured DOCX extraction produced too little text"),
            Err(e) => tracing::warn!(error = %e, "Structured DOCX extraction failed"),
        }

        tracing::info!("Trying raw text DOCX extraction");
        match Self::extract_raw_text(bytes) {
            Ok(text) if text.chars().count() > min_chars => {
                return ExtractedContent::with_text(
                    text,
                    Self::fallback_metadata("Word Document (Raw)", "raw-text", file_size),
                );
            }
            Ok(_) => tracing::debug!("Raw text DOCX extraction produced too little text"),
            Err(e) => tracing::warn!(error = %e, "Raw text DOCX extraction failed"),
        }

        tracing::info!("Trying XML node DOCX extraction");
        match Self::extract_xml_nodes(bytes) {
            Ok(text) if text.chars().count() > min_chars => {
                return ExtractedContent::with_text(
                    text,
                    Self::fallback_metadata("Word Document (XML)", "xml", file_size),
                );
            }
            Ok(_) => tracing::debug!("XML node DOCX extraction produced too little text"),
            Err(e) => tracing::error!(error = %e, "XML node DOCX extraction failed"),
        }

        tracing::error!("All DOCX extraction methods failed");
        ExtractedContent {
            text: None,
            metadata: DocumentMetadata {
                error: Some("Could not extract text content".to_string()),
                ..Self::fallback_metadata("Word Document (Failed)", "failed", file_size)
            },
        }
    }

    fn fallback_metadata(file_type: &str, method: &str, file_size: u64) -> DocumentMetadata {
        DocumentMetadata {
            file_type: file_type.to_string(),
            file_size,
            extraction_method: method.to_string(),
            ..Default::default()
        }
    }

    fn extract_structured(bytes: &[u8]) -> Result<StructuredText> {
        let docx = panic::catch_unwind(AssertUnwindSafe(|| docx_rs::read_docx(bytes)))
            .map_err(|_| DocentError::Processing("DOCX parser panicked".to_string()))?
            .map_err(|e| DocentError::Processing(format!("DOCX parse error: {e}")))?;

        let mut parts: Vec<String> = Vec::new();
        let mut tables: Vec<&docx_rs::Table> = Vec::new();
        let mut paragraphs = 0;

        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    let text = Self::paragraph_text(paragraph);
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    if Self::is_heading(paragraph) {
                        parts.push(format!("\n## {text}\n"));
                    } else {
                        parts.push(text.to_string());
                    }
                    paragraphs += 1;
                }
                docx_rs::DocumentChild::Table(table) => tables.push(table),
                _ => {}
            }
        }

        for (index, table) in tables.iter().enumerate() {
            parts.push(format!("\n--- Table {} ---", index + 1));
            parts.extend(Self::table_rows(table));
            parts.push("--- End Table ---\n".to_string());
        }

        parts.extend(Self::header_footer_lines(bytes));

        Ok(StructuredText {
            text: clean_text(&parts.join("\n")),
            paragraphs,
            tables: tables.len(),
        })
    }

    fn is_heading(paragraph: &docx_rs::Paragraph) -> bool {
        paragraph
            .property
            .style
            .as_ref()
            .is_some_and(|style| style.val.starts_with("Heading"))
    }

    fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        Self::push_children_text(&paragraph.children, &mut content);
        content
    }

    /// Text of runs, including runs nested inside hyperlinks.
    fn push_children_text(children: &[docx_rs::ParagraphChild], content: &mut String) {
        for child in children {
            match child {
                docx_rs::ParagraphChild::Run(run) => {
                    for run_child in &run.children {
                        if let docx_rs::RunChild::Text(text) = run_child {
                            content.push_str(&text.text);
                        }
                    }
                }
                docx_rs::ParagraphChild::Hyperlink(link) => {
                    Self::push_children_text(&link.children, content);
                }
                _ => {}
            }
        }
    }

    /// Rows as `a | b`, skipping empty cells and rows with no text at all.
    fn table_rows(table: &docx_rs::Table) -> Vec<String> {
        let mut rows = Vec::new();

        for table_child in &table.rows {
            let docx_rs::TableChild::TableRow(row) = table_child;
            let mut cells: Vec<String> = Vec::new();
            for row_child in &row.cells {
                let docx_rs::TableRowChild::TableCell(cell) = row_child;
                let mut cell_text = String::new();
                for cell_child in &cell.children {
                    if let docx_rs::TableCellContent::Paragraph(para) = cell_child {
                        if !cell_text.is_empty() {
                            cell_text.push('\n');
                        }
                        cell_text.push_str(&Self::paragraph_text(para));
                    }
                }
                let cell_text = cell_text.trim();
                if !cell_text.is_empty() {
                    cells.push(cell_text.to_string());
                }
            }
            if !cells.is_empty() {
                rows.push(cells.join(" | "));
            }
        }

        rows
    }

    /// `[Header: ..]` and `[Footer: ..]` lines from the header/footer parts.
    /// A missing or unreadable part contributes nothing.
    fn header_footer_lines(bytes: &[u8]) -> Vec<String> {
        let Ok(mut archive) = ZipArchive::new(Cursor::new(bytes)) else {
            return Vec::new();
        };

        let mut names: Vec<String> = archive
            .file_names()
            .filter(|name| Self::is_part(name, "header") || Self::is_part(name, "footer"))
            .map(String::from)
            .collect();
        names.sort();

        let mut headers = Vec::new();
        let mut footers = Vec::new();
        for name in names {
            let Ok(xml) = Self::read_part(&mut archive, &name) else {
                tracing::debug!(part = %name, "Skipping unreadable DOCX part");
                continue;
            };
            let is_header = Self::is_part(&name, "header");
            for paragraph in Self::xml_paragraphs(&xml) {
                if is_header {
                    headers.push(format!("[Header: {paragraph}]"));
                } else {
                    footers.push(format!("[Footer: {paragraph}]"));
                }
            }
        }

        headers.extend(footers);
        headers
    }

    fn is_part(name: &str, kind: &str) -> bool {
        name.strip_prefix("word/")
            .and_then(|rest| rest.strip_prefix(kind))
            .and_then(|rest| rest.strip_suffix(".xml"))
            .is_some_and(|middle| middle.chars().all(|c| c.is_ascii_digit()))
    }

    fn extract_raw_text(bytes: &[u8]) -> Result<String> {
        let xml = Self::document_xml(bytes)?;
        Ok(clean_text(&Self::xml_paragraphs(&xml).join("\n\n")))
    }

    fn extract_xml_nodes(bytes: &[u8]) -> Result<String> {
        let xml = Self::document_xml(bytes)?;
        let nodes: Vec<String> = Self::xml_text_nodes(&xml)
            .into_iter()
            .map(|node| node.trim().to_string())
            .filter(|node| node.chars().count() > 1)
            .collect();
        Ok(clean_text(&nodes.join(" ")))
    }

    fn document_xml(bytes: &[u8]) -> Result<String> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| DocentError::Processing(format!("DOCX archive error: {e}")))?;
        Self::read_part(&mut archive, DOCUMENT_PART)
    }

    fn read_part(archive: &mut ZipArchive<Cursor<&[u8]>>, path: &str) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| DocentError::Processing(format!("Failed to read {path} from DOCX: {e}")))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| DocentError::Processing(format!("Failed to read {path} content: {e}")))?;

        Ok(content)
    }

    /// Non-empty paragraphs (`w:p`), tabs and breaks kept as whitespace.
    fn xml_paragraphs(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        // Runs split words at arbitrary points; keep their whitespace.
        reader.config_mut().trim_text(false);

        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text = true,
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"w:tab" => current.push('\t'),
                    b"w:br" | b"w:cr" => current.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text => {
                    if let Ok(text) = std::str::from_utf8(e.as_ref()) {
                        current.push_str(text);
                    }
                }
                Ok(Event::GeneralRef(e)) if in_text => {
                    if let Some(c) = std::str::from_utf8(&e).ok().and_then(resolve_entity) {
                        current.push(c);
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:p" => {
                        let trimmed = current.trim();
                        if !trimmed.is_empty() {
                            paragraphs.push(trimmed.to_string());
                        }
                        current.clear();
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    tracing::debug!(error = %e, "Stopping DOCX XML walk early");
                    break;
                }
                _ => {}
            }
            buf.clear();
        }

        let trimmed = current.trim();
        if !trimmed.is_empty() {
            paragraphs.push(trimmed.to_string());
        }

        paragraphs
    }

    /// Contents of every `w:t` element, in document order.
    fn xml_text_nodes(xml: &str) -> Vec<String> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut nodes = Vec::new();
        let mut current: Option<String> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => {
                    current = Some(String::new());
                }
                Ok(Event::Text(e)) => {
                    if let (Some(node), Ok(text)) = (current.as_mut(), std::str::from_utf8(e.as_ref()))
                    {
                        node.push_str(text);
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    if let (Some(node), Some(c)) = (
                        current.as_mut(),
                        std::str::from_utf8(&e).ok().and_then(resolve_entity),
                    ) {
                        node.push(c);
                    }
                }
                Ok(Event::End(e)) if e.name().as_ref() == b"w:t" => {
                    if let Some(node) = current.take() {
                        nodes.push(node);
                    }
                }
                Ok(Event::Eof) => break,
                Err(_) => break,
                _ => {}
            }
            buf.clear();
        }

        nodes
    }
}

/// Predefined XML entities and numeric character references.
fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
