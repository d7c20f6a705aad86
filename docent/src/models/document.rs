use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Words per minute used for the library reading-time estimate.
pub const READING_WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Match a path's extension case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentMetadata {
    pub file_type: String,
    pub file_size: u64,
    pub word_count: usize,
    pub character_count: usize,
    pub extraction_method: String,
    /// PDF only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    /// DOCX only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentMetadata {
    /// Page-like count used by the library summary: pages for PDFs,
    /// paragraphs for Word documents.
    pub fn page_equivalent(&self) -> usize {
        self.total_pages.or(self.paragraphs).unwrap_or(0)
    }
}

/// Text extracted from one file plus the facts gathered while extracting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub content: String,
    pub metadata: DocumentMetadata,
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailedLoad {
    pub file: String,
    pub reason: String,
    pub metadata: Option<DocumentMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LibrarySummary {
    pub total_files: usize,
    pub successful_loads: usize,
    pub failed_loads: usize,
    pub failed_files: Vec<FailedLoad>,
    pub total_words: usize,
    pub total_pages: usize,
    pub total_size: u64,
    /// Minutes, never less than one.
    pub estimated_reading_time: usize,
}

impl LibrarySummary {
    pub fn reading_time_for(total_words: usize) -> usize {
        (total_words / READING_WORDS_PER_MINUTE).max(1)
    }
}

/// Outcome of scanning the data folder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadStatus {
    FolderNotFound { folder: String },
    NoSupportedFiles { folder: String, files: Vec<String> },
    AllFailed { failures: Vec<FailedLoad> },
    Partial { success: usize, total: usize, failed: usize },
    AllLoaded { success: usize, total: usize },
}

impl LoadStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Partial { .. } | Self::AllLoaded { .. })
    }
}
