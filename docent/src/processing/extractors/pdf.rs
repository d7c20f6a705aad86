//! PDF extractor using pdf-extract, one page at a time

use std::panic::{self, AssertUnwindSafe};

use super::ExtractedContent;
use crate::error::{DocentError, Result};
use crate::models::DocumentMetadata;

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn extract(bytes: &[u8], file_size: u64) -> Result<ExtractedContent> {
        let pages = Self::extract_pages(bytes)?;
        let text = Self::join_pages(&pages);

        let metadata = DocumentMetadata {
            file_type: "PDF".to_string(),
            file_size,
            extraction_method: "pdf-extract".to_string(),
            total_pages: Some(pages.len()),
            ..Default::default()
        };

        Ok(ExtractedContent::with_text(text, metadata))
    }

    fn extract_pages(bytes: &[u8]) -> Result<Vec<String>> {
        // pdf-extract panics on some malformed inputs.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(bytes)
        }));

        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(DocentError::Processing(format!(
                "PDF extraction failed: {e}"
            ))),
            Err(_) => Err(DocentError::Processing(
                "PDF extraction failed: parser panicked".to_string(),
            )),
        }
    }

    /// Blank pages are skipped but keep their number in the sequence.
    fn join_pages(pages: &[String]) -> String {
        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            if page.trim().is_empty() {
                continue;
            }
            text.push_str(&format!("\n--- Page {} ---\n", index + 1));
            text.push_str(page);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let pages = vec![
            "Intro text".to_string(),
            "   \n".to_string(),
            "Closing text".to_string(),
        ];
        assert_eq!(
            PdfExtractor::join_pages(&pages),
            "\n--- Page 1 ---\nIntro text\n--- Page 3 ---\nClosing text"
        );
    }

    #[test]
    fn test_join_pages_all_blank() {
        let pages = vec![String::new(), " ".to_string()];
        assert_eq!(PdfExtractor::join_pages(&pages), "");
    }

    #[test]
    fn test_invalid_pdf_is_an_error() {
        let result = PdfExtractor::extract(b"this is not a pdf", 17);
        assert!(matches!(result, Err(DocentError::Processing(_))));
    }
}
