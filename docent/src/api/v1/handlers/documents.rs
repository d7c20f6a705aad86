//! v1 Document library handlers.
//!
//! The library is scanned once per process; these endpoints read the
//! cached scan, inspect one document, or force a rescan.

use std::sync::Arc;

use axum::extract::{Path, Query, State};

use crate::api::v1::dto::{
    status_kind, DocumentDetailResponse, DocumentMetadataResponse, DocumentSummaryResponse,
    LanguageQuery, LibraryResponse, LibrarySummaryResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;
use crate::processing::{truncate_chars, LoadReport};

fn library_response(state: &AppState, report: &LoadReport, language: &str) -> LibraryResponse {
    LibraryResponse {
        folder: report.folder.display().to_string(),
        loaded: report.is_loaded(),
        status_kind: status_kind(&report.status).to_string(),
        status: state.translations.load_status(language, &report.status),
        summary: LibrarySummaryResponse::from(&report.summary),
        documents: report
            .documents
            .values()
            .map(DocumentSummaryResponse::from)
            .collect(),
    }
}

fn with_meta(response: LibraryResponse) -> ApiResponse<LibraryResponse> {
    let total = response.documents.len() as u64;
    ApiResponse::success_with_meta(response, ResponseMeta { total: Some(total) })
}

/// `GET /api/v1/documents`
///
/// Scans the data folder on first use.
#[utoipa::path(
    get,
    path = "/api/v1/documents",
    tag = "documents",
    operation_id = "documents.list",
    params(LanguageQuery),
    responses(
        (status = 200, description = "Library summary and loaded documents", body = LibraryResponse),
        (status = 500, description = "Internal error", body = ApiError),
    )
)]
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<LibraryResponse> {
    let language = state.resolve_language(query.lang.as_deref());
    match state.library.snapshot().await {
        Ok(report) => with_meta(library_response(&state, &report, &language)),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/documents/{name}`
#[utoipa::path(
    get,
    path = "/api/v1/documents/{name}",
    tag = "documents",
    operation_id = "documents.get",
    params(("name" = String, Path, description = "Document file name")),
    responses(
        (status = 200, description = "Document metadata and text preview", body = DocumentDetailResponse),
        (status = 404, description = "Document not loaded", body = ApiError),
    )
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResponse<DocumentDetailResponse> {
    let report: Arc<LoadReport> = match state.library.snapshot().await {
        Ok(report) => report,
        Err(e) => return e.into(),
    };

    let Some(document) = report.documents.get(&name) else {
        return ApiResponse::error(ErrorCode::NotFound, format!("Document {name} not found"));
    };

    let preview = truncate_chars(&document.content, state.config.documents.preview_length);
    ApiResponse::success(DocumentDetailResponse {
        name: document.name.clone(),
        metadata: DocumentMetadataResponse::from(&document.metadata),
        truncated: preview.len() < document.content.len(),
        preview: preview.to_string(),
    })
}

/// `POST /api/v1/documents:reload`
///
/// Drops the cached scan and reads the data folder again.
#[utoipa::path(
    post,
    path = "/api/v1/documents:reload",
    tag = "documents",
    operation_id = "documents.reload",
    params(LanguageQuery),
    responses(
        (status = 200, description = "Library after the rescan", body = LibraryResponse),
        (status = 500, description = "Internal error", body = ApiError),
    )
)]
pub async fn reload_documents(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> ApiResponse<LibraryResponse> {
    let language = state.resolve_language(query.lang.as_deref());
    match state.library.reload().await {
        Ok(report) => {
            tracing::info!(
                loaded = report.documents.len(),
                failed = report.summary.failed_loads,
                "Document library reloaded"
            );
            with_meta(library_response(&state, &report, &language))
        }
        Err(e) => e.into(),
    }
}
