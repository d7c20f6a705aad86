use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};

use crate::api::v1::dto::{SpeechTestRequest, VoicesResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// Raw audio with the given MIME type.
pub(crate) fn audio_response(audio: &[u8], content_type: &'static str) -> Response {
    let mut response = Response::new(Body::from(audio.to_vec()));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("private, max-age=3600"));
    response
}

/// `GET /api/v1/voices`
#[utoipa::path(
    get,
    path = "/api/v1/voices",
    tag = "speech",
    operation_id = "speech.voices",
    responses(
        (status = 200, description = "Voices offered in the sidebar", body = VoicesResponse),
    )
)]
pub async fn list_voices(State(state): State<AppState>) -> ApiResponse<VoicesResponse> {
    ApiResponse::success(VoicesResponse {
        available: state.speech.is_available(),
        default_voice: state.speech.default_voice().to_string(),
        voices: state.speech.voices().to_vec(),
    })
}

/// `POST /api/v1/speech:test`
///
/// Reads a short sample sentence in the chosen voice.
#[utoipa::path(
    post,
    path = "/api/v1/speech:test",
    tag = "speech",
    operation_id = "speech.test",
    request_body = SpeechTestRequest,
    responses(
        (status = 200, description = "Audio bytes in the configured format"),
        (status = 400, description = "Unknown voice", body = ApiError),
        (status = 501, description = "Speech is not configured", body = ApiError),
        (status = 502, description = "Speech API failed", body = ApiError),
    )
)]
pub async fn test_speech(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<SpeechTestRequest>,
) -> Response {
    let voice = req
        .voice
        .unwrap_or_else(|| state.speech.default_voice().to_string());
    if !state.speech.is_known_voice(&voice) {
        return ApiResponse::<()>::error(ErrorCode::InvalidRequest, format!("Unknown voice: {voice}"))
            .into_response();
    }

    let language = state.resolve_language(req.language.as_deref());
    let sample = state.translations.t(&language, "test_audio_text", &[]);

    match state.speech.synthesize(&sample, &voice).await {
        Ok(audio) => audio_response(&audio, state.speech.content_type()),
        Err(e) => ApiResponse::<()>::from(e).into_response(),
    }
}
