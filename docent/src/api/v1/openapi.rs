use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docent API",
        version = "1.0.0",
        description = "Chat with a folder of PDF and Word documents through a hosted LLM, with optional spoken answers.",
    ),
    paths(
        handlers::health::health_check,
        handlers::i18n::list_languages,
        handlers::i18n::get_translations,
        handlers::documents::list_documents,
        handlers::documents::get_document,
        handlers::documents::reload_documents,
        handlers::sessions::create_session,
        handlers::sessions::get_session,
        handlers::sessions::update_session,
        handlers::sessions::ask,
        handlers::sessions::clear_messages,
        handlers::sessions::message_audio,
        handlers::speech::list_voices,
        handlers::speech::test_speech,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Documents
        dto::documents::DocumentMetadataResponse,
        dto::documents::DocumentSummaryResponse,
        dto::documents::FailedFileResponse,
        dto::documents::LibrarySummaryResponse,
        dto::documents::LibraryResponse,
        dto::documents::DocumentDetailResponse,
        // Sessions
        dto::sessions::UpdateSessionRequest,
        dto::sessions::AskRequest,
        dto::sessions::SessionSettingsResponse,
        dto::sessions::MessageResponse,
        dto::sessions::SessionResponse,
        dto::sessions::AskResponse,
        dto::sessions::ClearChatResponse,
        // Speech
        dto::speech::VoicesResponse,
        dto::speech::SpeechTestRequest,
        // i18n
        dto::i18n::LanguageResponse,
        dto::i18n::LanguagesResponse,
        dto::i18n::TranslationsResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DocumentsStatus,
        handlers::health::LlmStatus,
        handlers::health::SpeechStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "i18n", description = "UI languages and strings"),
        (name = "documents", description = "Document library summary, details and reload"),
        (name = "sessions", description = "Chat sessions, questions and spoken answers"),
        (name = "speech", description = "Voices and voice preview"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
