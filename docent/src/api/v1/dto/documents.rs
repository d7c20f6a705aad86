//! Document library DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use crate::models;
use crate::processing::format_file_size;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Query parameters shared by endpoints that return localized text.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct LanguageQuery {
    /// UI language code (`en`, `ar`, `fr`, `es`). Unknown codes fall back
    /// to the default language.
    pub lang: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadataResponse {
    /// `PDF` or `DOCX`.
    pub file_type: String,
    pub file_size: u64,
    /// Human-readable size, e.g. `1.2 MB`.
    pub file_size_label: String,
    pub word_count: usize,
    pub character_count: usize,
    pub extraction_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tables: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&models::DocumentMetadata> for DocumentMetadataResponse {
    fn from(metadata: &models::DocumentMetadata) -> Self {
        Self {
            file_type: metadata.file_type.clone(),
            file_size: metadata.file_size,
            file_size_label: format_file_size(metadata.file_size),
            word_count: metadata.word_count,
            character_count: metadata.character_count,
            extraction_method: metadata.extraction_method.clone(),
            total_pages: metadata.total_pages,
            paragraphs: metadata.paragraphs,
            tables: metadata.tables,
            error: metadata.error.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummaryResponse {
    /// File name; also the document's identifier.
    pub name: String,
    pub metadata: DocumentMetadataResponse,
}

impl From<&models::Document> for DocumentSummaryResponse {
    fn from(document: &models::Document) -> Self {
        Self {
            name: document.name.clone(),
            metadata: DocumentMetadataResponse::from(&document.metadata),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedFileResponse {
    pub file: String,
    pub reason: String,
}

impl From<&models::FailedLoad> for FailedFileResponse {
    fn from(failed: &models::FailedLoad) -> Self {
        Self {
            file: failed.file.clone(),
            reason: failed.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibrarySummaryResponse {
    pub total_files: usize,
    pub successful_loads: usize,
    pub failed_loads: usize,
    pub failed_files: Vec<FailedFileResponse>,
    pub total_words: usize,
    /// PDF pages plus Word paragraphs.
    pub total_pages: usize,
    pub total_size: u64,
    pub total_size_label: String,
    /// Minutes at 200 words per minute, at least 1.
    pub estimated_reading_time: usize,
}

impl From<&models::LibrarySummary> for LibrarySummaryResponse {
    fn from(summary: &models::LibrarySummary) -> Self {
        Self {
            total_files: summary.total_files,
            successful_loads: summary.successful_loads,
            failed_loads: summary.failed_loads,
            failed_files: summary.failed_files.iter().map(Into::into).collect(),
            total_words: summary.total_words,
            total_pages: summary.total_pages,
            total_size: summary.total_size,
            total_size_label: format_file_size(summary.total_size),
            estimated_reading_time: summary.estimated_reading_time,
        }
    }
}

/// Response for `GET /v1/documents` and `POST /v1/documents:reload`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryResponse {
    /// Folder that was scanned.
    pub folder: String,
    /// True when at least one document was loaded.
    pub loaded: bool,
    /// Outcome of the scan: `folder_not_found`, `no_supported_files`,
    /// `all_failed`, `partial` or `all_loaded`.
    pub status_kind: String,
    /// Localized status line.
    pub status: String,
    pub summary: LibrarySummaryResponse,
    pub documents: Vec<DocumentSummaryResponse>,
}

/// Response for `GET /v1/documents/{name}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetailResponse {
    pub name: String,
    pub metadata: DocumentMetadataResponse,
    /// Leading characters of the extracted text.
    pub preview: String,
    /// True when `preview` is shorter than the full text.
    pub truncated: bool,
}

/// Machine-readable name of a load status.
pub fn status_kind(status: &models::LoadStatus) -> &'static str {
    match status {
        models::LoadStatus::FolderNotFound { .. } => "folder_not_found",
        models::LoadStatus::NoSupportedFiles { .. } => "no_supported_files",
        models::LoadStatus::AllFailed { .. } => "all_failed",
        models::LoadStatus::Partial { .. } => "partial",
        models::LoadStatus::AllLoaded { .. } => "all_loaded",
    }
}
