mod common;
use common::{create_bare_docx, create_test_docx, document_xml, paragraphs_xml};

use docent::processing::extractors::DocxExtractor;

const MIN_CHARS: usize = 50;

fn extract(bytes: &[u8]) -> docent::processing::extractors::ExtractedContent {
    DocxExtractor::extract(bytes, bytes.len() as u64, MIN_CHARS)
}

#[test]
fn test_docx_basic_text() {
    use docx_rs::*;

    let bytes = create_test_docx(|docx| {
        docx.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("The quarterly report covers revenue.")),
        )
        .add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("Expenses grew faster than expected.")),
        )
    });

    let extracted = extract(&bytes);
    let text = extracted.text.as_deref().expect("structured extraction should succeed");

    assert!(text.contains("The quarterly report covers revenue."));
    assert!(text.contains("Expenses grew faster than expected."));
    assert_eq!(extracted.metadata.file_type, "Word Document");
    assert_eq!(extracted.metadata.extraction_method, "docx-rs");
    assert_eq!(extracted.metadata.paragraphs, Some(2));
    assert_eq!(extracted.metadata.tables, Some(0));
    assert_eq!(extracted.metadata.word_count, 10);
    assert_eq!(extracted.metadata.file_size, bytes.len() as u64);
}

#[test]
fn test_docx_headings_are_marked() {
    use docx_rs::*;

    let bytes = create_test_docx(|docx| {
        docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Project Charter"))
                .style("Heading1"),
        )
        .add_paragraph(Paragraph::new().add_run(
            Run::new().add_text("This charter describes the goals and the schedule of the project."),
        ))
    });

    let text = extract(&bytes).text.expect("text");
    assert!(text.contains("## Project Charter"), "got: {text}");
    assert!(text.contains("goals and the schedule"));
}

#[test]
fn test_docx_tables_are_rendered_after_paragraphs() {
    use docx_rs::*;

    let bytes = create_test_docx(|docx| {
        docx.add_paragraph(Paragraph::new().add_run(
            Run::new().add_text("The following table lists the deadlines for each milestone."),
        ))
        .add_table(Table::new(vec![
            TableRow::new(vec![
                TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Milestone"))),
                TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Due"))),
            ]),
            TableRow::new(vec![
                TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Draft"))),
                TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("March"))),
            ]),
        ]))
    });

    let extracted = extract(&bytes);
    let text = extracted.text.expect("text");

    assert!(text.contains("--- Table 1 --- Milestone | Due Draft | March --- End Table ---"), "got: {text}");
    let paragraph_at = text.find("deadlines").unwrap();
    let table_at = text.find("--- Table 1 ---").unwrap();
    assert!(paragraph_at < table_at);
    assert_eq!(extracted.metadata.tables, Some(1));
}

#[test]
fn test_docx_hyperlink_text_is_kept() {
    use docx_rs::*;

    let bytes = create_test_docx(|docx| {
        docx.add_paragraph(
            Paragraph::new()
                .add_run(Run::new().add_text("Submit expense claims through "))
                .add_hyperlink(
                    Hyperlink::new("https://example.com/expenses", HyperlinkType::External)
                        .add_run(Run::new().add_text("the finance portal")),
                )
                .add_run(Run::new().add_text(" before the fifth of each month.")),
        )
        .add_table(Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Contact"))),
            TableCell::new().add_paragraph(Paragraph::new().add_hyperlink(
                Hyperlink::new("mailto:finance@example.com", HyperlinkType::External)
                    .add_run(Run::new().add_text("finance@example.com")),
            )),
        ])]))
    });

    let extracted = extract(&bytes);
    assert_eq!(extracted.metadata.extraction_method, "docx-rs");
    let text = extracted.text.expect("text");

    assert!(
        text.contains("Submit expense claims through the finance portal before the fifth of each month."),
        "got: {text}"
    );
    assert!(text.contains("Contact | finance@example.com"), "got: {text}");
}

#[test]
fn test_short_docx_falls_back_and_fails() {
    use docx_rs::*;

    let bytes = create_test_docx(|docx| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text("Too short.")))
    });

    let extracted = extract(&bytes);
    assert!(extracted.text.is_none());
    assert!(!extracted.has_content());
    assert_eq!(extracted.metadata.file_type, "Word Document (Failed)");
    assert_eq!(extracted.metadata.extraction_method, "failed");
    assert_eq!(
        extracted.metadata.error.as_deref(),
        Some("Could not extract text content")
    );
}

#[test]
fn test_bare_docx_uses_raw_text_fallback() {
    let xml = document_xml(&paragraphs_xml(&[
        "Minutes of the planning meeting held on Monday.",
        "Attendees agreed to move the launch to the second week of May.",
    ]));
    let bytes = create_bare_docx(&xml);

    let extracted = extract(&bytes);
    let text = extracted.text.expect("raw text fallback should succeed");

    assert_eq!(extracted.metadata.extraction_method, "raw-text");
    assert_eq!(extracted.metadata.file_type, "Word Document (Raw)");
    assert_eq!(
        text,
        "Minutes of the planning meeting held on Monday. Attendees agreed to move the launch to the second week of May."
    );
    assert!(extracted.metadata.paragraphs.is_none());
}

#[test]
fn test_bare_docx_keeps_entities_and_split_runs() {
    let xml = document_xml(
        r#"<w:p><w:r><w:t>Terms &amp; conditions for</w:t></w:r><w:r><w:t xml:space="preserve"> suppliers </w:t></w:r><w:r><w:t>apply to every purchase order issued in 2024.</w:t></w:r></w:p>"#,
    );
    let bytes = create_bare_docx(&xml);

    let text = extract(&bytes).text.expect("text");
    assert_eq!(
        text,
        "Terms & conditions for suppliers apply to every purchase order issued in 2024."
    );
}

#[test]
fn test_not_a_zip_fails_without_panicking() {
    let extracted = extract(b"definitely not a word document");
    assert!(extracted.text.is_none());
    assert_eq!(extracted.metadata.extraction_method, "failed");
}
