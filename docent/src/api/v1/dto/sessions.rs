//! Chat session DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::i18n::is_rtl;
use crate::models::{ChatMessage, ChatRole, SessionSettings, SettingsUpdate};
use crate::services::render_markdown;
use crate::session::Session;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for `PATCH /v1/sessions/{sessionId}`. Absent fields are
/// left unchanged.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    pub language: Option<String>,
    pub audio_enabled: Option<bool>,
    pub voice: Option<String>,
}

impl From<UpdateSessionRequest> for SettingsUpdate {
    fn from(req: UpdateSessionRequest) -> Self {
        Self {
            language: req.language,
            audio_enabled: req.audio_enabled,
            voice: req.voice,
        }
    }
}

/// Request body for `POST /v1/sessions/{sessionId}/messages`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub question: String,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettingsResponse {
    pub language: String,
    /// Whether the UI should lay out right-to-left.
    pub rtl: bool,
    pub audio_enabled: bool,
    pub voice: String,
}

impl From<&SessionSettings> for SessionSettingsResponse {
    fn from(settings: &SessionSettings) -> Self {
        Self {
            language: settings.language.clone(),
            rtl: is_rtl(&settings.language),
            audio_enabled: settings.audio_enabled,
            voice: settings.voice.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    /// `user` or `assistant`.
    pub role: String,
    /// Text as typed or as returned by the model.
    pub content: String,
    /// Assistant messages only: `content` rendered from markdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Assistant messages only: where to fetch the spoken answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl MessageResponse {
    pub fn from_message(session_id: &Uuid, message: &ChatMessage) -> Self {
        let is_assistant = message.role == ChatRole::Assistant;
        Self {
            id: message.id,
            role: message.role.to_string(),
            content: message.content.clone(),
            html: is_assistant.then(|| render_markdown(&message.content)),
            created_at: message.created_at,
            audio_url: is_assistant.then(|| {
                format!(
                    "/api/v1/sessions/{session_id}/messages/{}/audio",
                    message.id
                )
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: Uuid,
    pub settings: SessionSettingsResponse,
    pub messages: Vec<MessageResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            settings: SessionSettingsResponse::from(&session.settings),
            messages: session
                .messages
                .iter()
                .map(|message| MessageResponse::from_message(&session.id, message))
                .collect(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// Response for `POST /v1/sessions/{sessionId}/messages`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AskResponse {
    pub question: MessageResponse,
    pub answer: MessageResponse,
}

/// Response for `DELETE /v1/sessions/{sessionId}/messages`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearChatResponse {
    pub session_id: Uuid,
    pub cleared: bool,
}
