use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;
use crate::llm::LlmBackend;

/// Health data returned inside the v1 envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub documents: DocumentsStatus,
    pub llm: LlmStatus,
    pub speech: SpeechStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentsStatus {
    /// `loaded`, `empty` or `not_scanned`.
    pub status: String,
    pub folder: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LlmStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SpeechStatus {
    pub status: String,
    pub model: String,
    pub voice: String,
}

/// `GET /api/v1/health`
///
/// Does not trigger a folder scan.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let folder = state.library.loader().folder().display().to_string();
    let (library_status, count) = match state.library.cached().await {
        None => ("not_scanned", 0),
        Some(report) if report.is_loaded() => ("loaded", report.documents.len()),
        Some(_) => ("empty", 0),
    };

    let llm = match (state.llm.backend(), state.llm.config()) {
        (LlmBackend::Unavailable { .. }, _) | (_, None) => LlmStatus {
            status: availability(false),
            provider: None,
            model: None,
        },
        (backend, Some(config)) => LlmStatus {
            status: availability(true),
            provider: Some(backend.label().to_string()),
            model: Some(config.model.clone()),
        },
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documents: DocumentsStatus {
            status: library_status.to_string(),
            folder,
            count,
        },
        llm,
        speech: SpeechStatus {
            status: availability(state.speech.is_available()),
            model: state.config.speech.model.clone(),
            voice: state.speech.default_voice().to_string(),
        },
    })
}

fn availability(available: bool) -> String {
    if available { "available" } else { "unavailable" }.to_string()
}
