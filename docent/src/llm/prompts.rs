//! Prompt templates for document question answering
//!
//! These templates use basic `format!()` interpolation for type safety.

use crate::models::Document;
use crate::processing::truncate_chars;

/// The document text packed into one request, plus a short listing of the
/// documents for the instructions block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentContext {
    /// One `- name (file type)` line per document.
    pub documents_info: String,
    /// Delimited sections, one per document.
    pub content: String,
}

/// Pack document text into a prompt-sized context.
///
/// The character budget is split evenly: each document contributes at most
/// `max_content_length / documents.len()` characters, so one long file
/// cannot crowd out the rest.
///
/// # Example
/// ```
/// use docent::llm::prompts::build_document_context;
///
/// let context = build_document_context(&[], 15000);
/// assert!(context.content.is_empty());
/// ```
pub fn build_document_context(documents: &[&Document], max_content_length: usize) -> DocumentContext {
    if documents.is_empty() {
        return DocumentContext::default();
    }

    let per_document = max_content_length / documents.len();
    let mut content = String::new();
    let mut info_lines = Vec::with_capacity(documents.len());

    for document in documents {
        let excerpt = truncate_chars(&document.content, per_document);
        content.push_str(&format!(
            "\n\n=== DOCUMENT: {name} ===\n{excerpt}\n=== END OF {name} ===",
            name = document.name
        ));

        let file_type = if document.metadata.file_type.is_empty() {
            "Unknown"
        } else {
            document.metadata.file_type.as_str()
        };
        info_lines.push(format!("- {} ({})", document.name, file_type));
    }

    DocumentContext {
        documents_info: info_lines.join("\n"),
        content,
    }
}

/// English name of a UI language, used to tell the model what to reply in.
pub fn response_language_name(language: &str) -> &'static str {
    match language {
        "ar" => "Arabic",
        "fr" => "French",
        "es" => "Spanish",
        _ => "English",
    }
}

/// System prompt for answering a question from the loaded documents
pub fn document_qa_system_prompt(language: &str, documents_info: &str, content: &str) -> String {
    let language_name = response_language_name(language);

    format!(
        r#"You are an intelligent document assistant with access to the following documents:
{documents_info}

INSTRUCTIONS:
1. Answer questions using ONLY the information contained in the documents below.
2. Always mention which document(s) the information comes from.
3. If several documents are relevant, combine what they say and cite each one.
4. If the answer is not in the documents, say so clearly instead of guessing.
5. Keep answers clear and well structured. Markdown lists and headings are allowed.
6. Respond in {language_name}, even when the documents are written in another language.

DOCUMENTS:{content}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentMetadata;
    use std::path::PathBuf;

    fn document(name: &str, content: &str, file_type: &str) -> Document {
        Document {
            name: name.to_string(),
            content: content.to_string(),
            metadata: DocumentMetadata {
                file_type: file_type.to_string(),
                ..Default::default()
            },
            file_path: PathBuf::from(name),
        }
    }

    #[test]
    fn test_context_sections_and_info() {
        let a = document("a.pdf", "alpha text", "PDF");
        let b = document("b.docx", "beta text", "Word Document");

        let context = build_document_context(&[&a, &b], 1000);

        assert_eq!(
            context.documents_info,
            "- a.pdf (PDF)\n- b.docx (Word Document)"
        );
        assert_eq!(
            context.content,
            "\n\n=== DOCUMENT: a.pdf ===\nalpha text\n=== END OF a.pdf ===\
             \n\n=== DOCUMENT: b.docx ===\nbeta text\n=== END OF b.docx ==="
        );
    }

    #[test]
    fn test_context_budget_is_split_per_document() {
        let a = document("a.pdf", &"x".repeat(100), "PDF");
        let b = document("b.pdf", &"y".repeat(100), "PDF");
        let c = document("c.pdf", &"z".repeat(10), "PDF");

        let context = build_document_context(&[&a, &b, &c], 90);

        assert!(context.content.contains(&format!("\n{}\n", "x".repeat(30))));
        assert!(!context.content.contains(&"x".repeat(31)));
        assert!(context.content.contains(&format!("\n{}\n", "z".repeat(10))));
    }

    #[test]
    fn test_context_truncation_is_char_safe() {
        let a = document("ar.docx", "مرحبا بالعالم", "Word Document");
        let context = build_document_context(&[&a], 5);
        assert!(context.content.contains("\nمرحبا\n"));
    }

    #[test]
    fn test_missing_file_type_reads_unknown() {
        let a = document("a.pdf", "text", "");
        let context = build_document_context(&[&a], 100);
        assert_eq!(context.documents_info, "- a.pdf (Unknown)");
    }

    #[test]
    fn test_system_prompt_mentions_language_and_documents() {
        let prompt = document_qa_system_prompt("fr", "- a.pdf (PDF)", "\n\n=== DOCUMENT: a.pdf ===");
        assert!(prompt.contains("- a.pdf (PDF)"));
        assert!(prompt.contains("Respond in French"));
        assert!(prompt.ends_with("DOCUMENTS:\n\n=== DOCUMENT: a.pdf ==="));
    }

    #[test]
    fn test_unknown_language_defaults_to_english() {
        assert_eq!(response_language_name("de"), "English");
        assert_eq!(response_language_name("ar"), "Arabic");
    }
}
