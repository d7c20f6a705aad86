use crate::models::DocumentMetadata;
use crate::processing::text::count_words;

/// Text pulled out of a file. `text` is `None` when nothing usable was found;
/// the metadata still describes what was attempted.
#[derive(Debug)]
pub struct ExtractedContent {
    pub text: Option<String>,
    pub metadata: DocumentMetadata,
}

impl ExtractedContent {
    /// Fill in word and character counts from `text`.
    pub fn with_text(text: String, mut metadata: DocumentMetadata) -> Self {
        metadata.word_count = count_words(&text);
        metadata.character_count = text.chars().count();
        Self {
            text: Some(text),
            metadata,
        }
    }

    pub fn has_content(&self) -> bool {
        self.text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}

pub mod docx;
pub mod pdf;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
