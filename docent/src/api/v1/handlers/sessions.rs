//! v1 Chat session handlers.
//!
//! A session holds one browser's settings and conversation. The UI keeps
//! the session id in local storage and creates a new session when the
//! server no longer knows it.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::api::v1::dto::{
    AskRequest, AskResponse, ClearChatResponse, MessageResponse, SessionResponse,
    SessionSettingsResponse, UpdateSessionRequest,
};
use crate::api::v1::handlers::speech::audio_response;
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::error::{DocentError, Result};
use crate::models::{ChatMessage, ChatRole};

fn parse_id(raw: &str, label: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| DocentError::Validation(format!("Invalid {label} id: {raw}")))
}

/// `POST /api/v1/sessions`
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "sessions",
    operation_id = "sessions.create",
    responses(
        (status = 201, description = "New session with default settings", body = SessionResponse),
    )
)]
pub async fn create_session(State(state): State<AppState>) -> ApiResponse<SessionResponse> {
    let session = state.sessions.create().await;
    ApiResponse::created(SessionResponse::from(&session))
}

/// `GET /api/v1/sessions/{sessionId}`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}",
    tag = "sessions",
    operation_id = "sessions.get",
    params(("sessionId" = String, Path, description = "Session UUID")),
    responses(
        (status = 200, description = "Session settings and messages", body = SessionResponse),
        (status = 404, description = "Unknown session", body = ApiError),
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<SessionResponse> {
    let id = match parse_id(&session_id, "session") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match state.sessions.get(&id).await {
        Ok(session) => ApiResponse::success(SessionResponse::from(&session)),
        Err(e) => e.into(),
    }
}

/// `PATCH /api/v1/sessions/{sessionId}`
///
/// Changes the language, audio toggle or voice.
#[utoipa::path(
    patch,
    path = "/api/v1/sessions/{sessionId}",
    tag = "sessions",
    operation_id = "sessions.update",
    params(("sessionId" = String, Path, description = "Session UUID")),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Updated settings", body = SessionSettingsResponse),
        (status = 400, description = "Unsupported language or voice", body = ApiError),
        (status = 404, description = "Unknown session", body = ApiError),
    )
)]
pub async fn update_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    axum::Json(req): axum::Json<UpdateSessionRequest>,
) -> ApiResponse<SessionSettingsResponse> {
    let id = match parse_id(&session_id, "session") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    if let Some(ref language) = req.language {
        if !state.translations.has_language(language) {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                format!("Unsupported language: {language}"),
            );
        }
    }

    if let Some(ref voice) = req.voice {
        if !state.speech.is_known_voice(voice) {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                format!("Unknown voice: {voice}"),
            );
        }
    }

    match state.sessions.update_settings(&id, req.into()).await {
        Ok(settings) => {
            tracing::debug!(session_id = %id, language = %settings.language, "Session settings updated");
            ApiResponse::success(SessionSettingsResponse::from(&settings))
        }
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/sessions/{sessionId}/messages`
///
/// Records the question, answers it from the loaded documents and records
/// the answer. Model failures come back as an assistant message, not as an
/// error response.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/messages",
    tag = "sessions",
    operation_id = "sessions.ask",
    params(("sessionId" = String, Path, description = "Session UUID")),
    request_body = AskRequest,
    responses(
        (status = 200, description = "Question and answer messages", body = AskResponse),
        (status = 400, description = "Blank question", body = ApiError),
        (status = 404, description = "Unknown session", body = ApiError),
    )
)]
pub async fn ask(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    axum::Json(req): axum::Json<AskRequest>,
) -> ApiResponse<AskResponse> {
    let id = match parse_id(&session_id, "session") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    let session = match state.sessions.get(&id).await {
        Ok(session) => session,
        Err(e) => return e.into(),
    };
    let language = session.settings.language;

    let question = req.question.trim();
    if question.is_empty() {
        return ApiResponse::error(
            ErrorCode::InvalidRequest,
            state.translations.t(&language, "enter_question", &[]),
        );
    }

    let question_message = ChatMessage::user(question);
    if let Err(e) = state.sessions.append(&id, question_message.clone()).await {
        return e.into();
    }

    let report = match state.library.snapshot().await {
        Ok(report) => report,
        Err(e) => return e.into(),
    };

    let answer = state.assistant.answer(question, &report, &language).await;
    let answer_message = ChatMessage::assistant(answer);
    if let Err(e) = state.sessions.append(&id, answer_message.clone()).await {
        return e.into();
    }

    ApiResponse::success(AskResponse {
        question: MessageResponse::from_message(&id, &question_message),
        answer: MessageResponse::from_message(&id, &answer_message),
    })
}

/// `DELETE /api/v1/sessions/{sessionId}/messages`
///
/// Clears the conversation and its cached audio.
#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{sessionId}/messages",
    tag = "sessions",
    operation_id = "sessions.clear",
    params(("sessionId" = String, Path, description = "Session UUID")),
    responses(
        (status = 200, description = "Conversation cleared", body = ClearChatResponse),
        (status = 404, description = "Unknown session", body = ApiError),
    )
)]
pub async fn clear_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<ClearChatResponse> {
    let id = match parse_id(&session_id, "session") {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match state.sessions.clear(&id).await {
        Ok(()) => ApiResponse::success(ClearChatResponse {
            session_id: id,
            cleared: true,
        }),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/sessions/{sessionId}/messages/{messageId}/audio`
///
/// Speaks an assistant message with the session's voice. The first call
/// synthesizes; later calls return the audio kept in the session.
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/messages/{messageId}/audio",
    tag = "sessions",
    operation_id = "sessions.audio",
    params(
        ("sessionId" = String, Path, description = "Session UUID"),
        ("messageId" = String, Path, description = "Assistant message UUID"),
    ),
    responses(
        (status = 200, description = "Audio bytes in the configured format"),
        (status = 400, description = "Audio disabled or not an assistant message", body = ApiError),
        (status = 404, description = "Unknown session or message", body = ApiError),
        (status = 501, description = "Speech is not configured", body = ApiError),
        (status = 502, description = "Speech API failed", body = ApiError),
    )
)]
pub async fn message_audio(
    State(state): State<AppState>,
    Path((session_id, message_id)): Path<(String, String)>,
) -> Response {
    match speak_message(&state, &session_id, &message_id).await {
        Ok(audio) => audio_response(&audio, state.speech.content_type()),
        Err(response) => response.into_response(),
    }
}

async fn speak_message(
    state: &AppState,
    session_id: &str,
    message_id: &str,
) -> std::result::Result<Arc<Vec<u8>>, ApiResponse<()>> {
    let id = parse_id(session_id, "session")?;
    let message_id = parse_id(message_id, "message")?;

    let session = state.sessions.get(&id).await?;
    let message = state.sessions.message(&id, &message_id).await?;
    let language = &session.settings.language;

    if message.role != ChatRole::Assistant {
        return Err(ApiResponse::error(
            ErrorCode::InvalidRequest,
            "Only assistant messages can be read aloud",
        ));
    }

    if !session.settings.audio_enabled {
        return Err(ApiResponse::error(
            ErrorCode::InvalidRequest,
            state.translations.t(language, "audio_disabled", &[]),
        ));
    }

    if let Some(audio) = state.sessions.audio(&id, &message_id).await? {
        return Ok(audio);
    }

    let audio = Arc::new(
        state
            .speech
            .synthesize(&message.content, &session.settings.voice)
            .await?,
    );
    state
        .sessions
        .put_audio(&id, &message_id, Arc::clone(&audio))
        .await?;

    tracing::debug!(session_id = %id, message_id = %message_id, bytes = audio.len(), "Message audio ready");
    Ok(audio)
}
