//! # V1 API Response Envelope & Error Contract
//!
//! Every JSON endpoint returns an [`ApiResponse<T>`] envelope with three
//! optional top-level fields:
//!
//! ```json
//! {
//!   "data": { ... },       // present on success, absent on error
//!   "meta": { "total": 4 },  // optional, list endpoints only
//!   "error": { "code": "not_found", "message": "..." }  // present on error, absent on success
//! }
//! ```
//!
//! ## ID Formats
//!
//! - **sessionId**: UUID v4, created by `POST /api/v1/sessions`
//! - **messageId**: UUID v4
//! - **document name**: the file name inside the data folder (`report.pdf`)
//!
//! Audio endpoints answer with raw audio bytes on success and use the
//! envelope only for errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::DocentError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const UPSTREAM_MESSAGE: &str = "The model service request failed";

/// Error classification sent as a snake_case string, one HTTP status each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request was malformed, had invalid parameters, or failed validation.
    /// HTTP 400.
    InvalidRequest,
    /// The session, message or document does not exist. HTTP 404.
    NotFound,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
    /// The feature needs a provider that is not configured (no API key,
    /// speech disabled). HTTP 501.
    NotImplemented,
    /// A hosted model API failed or refused the call. HTTP 502.
    UpstreamError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            Self::UpstreamError => StatusCode::BAD_GATEWAY,
        }
    }

    /// Wire name, same as the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::NotFound => "not_found",
            Self::InternalError => "internal_error",
            Self::NotImplemented => "not_implemented",
            Self::UpstreamError => "upstream_error",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error payload within the API envelope.
///
/// ```json
/// { "code": "not_found", "message": "Session 6f1c... not found" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Machine-readable error classification.
    pub code: ErrorCode,
    /// Human-readable description safe to display to end users.
    /// Internal implementation details are never included.
    pub message: String,
}

/// Metadata attached to list responses.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Number of items in `data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// `{data|meta|error}` envelope. Exactly one of `data` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    fn payload(data: T, meta: Option<ResponseMeta>, status: StatusCode) -> Self {
        Self {
            data: Some(data),
            meta,
            error: None,
            status,
        }
    }

    /// HTTP 200 with `data`.
    pub fn success(data: T) -> Self {
        Self::payload(data, None, StatusCode::OK)
    }

    /// HTTP 200 with `data` and list metadata.
    pub fn success_with_meta(data: T, meta: ResponseMeta) -> Self {
        Self::payload(data, Some(meta), StatusCode::OK)
    }

    /// HTTP 201, used when a session is created.
    pub fn created(data: T) -> Self {
        Self::payload(data, None, StatusCode::CREATED)
    }

    /// Error envelope; the status follows from `code`.
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            data: None,
            meta: None,
            status: code.status(),
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match serde_json::to_value(&self) {
            Ok(body) => (self.status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                let fallback = ApiResponse::<()>::error(ErrorCode::InternalError, INTERNAL_MESSAGE);
                (fallback.status, Json(fallback)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<DocentError> for ApiResponse<T> {
    /// Upstream and internal failures are logged here and replaced by a
    /// fixed message.
    fn from(err: DocentError) -> Self {
        match err {
            DocentError::NotFound(ref msg) => {
                ApiResponse::error(ErrorCode::NotFound, format!("{msg} not found"))
            }

            DocentError::Validation(ref msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg.clone())
            }

            DocentError::Json(ref e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }

            DocentError::LlmRateLimit { retry_after } => {
                let msg = match retry_after {
                    Some(secs) => format!("Rate limit exceeded, retry after {secs} seconds"),
                    None => "Rate limit exceeded".to_string(),
                };
                ApiResponse::error(ErrorCode::UpstreamError, msg)
            }

            DocentError::LlmUnavailable(ref msg) | DocentError::SpeechUnavailable(ref msg) => {
                ApiResponse::error(ErrorCode::NotImplemented, msg.clone())
            }

            ref upstream @ (DocentError::Llm(_)
            | DocentError::LlmAuth(_)
            | DocentError::LlmInvalidRequest(_)
            | DocentError::Speech(_)) => {
                tracing::error!(error = %upstream, "Upstream error mapped to v1 response");
                ApiResponse::error(ErrorCode::UpstreamError, UPSTREAM_MESSAGE)
            }

            ref internal @ (DocentError::Processing(_)
            | DocentError::Http(_)
            | DocentError::Io(_)
            | DocentError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, INTERNAL_MESSAGE)
            }
        }
    }
}
