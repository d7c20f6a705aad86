//! Voice and speech DTOs for the v1 API.

use serde::{Deserialize, Serialize};

/// Response for `GET /v1/voices`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoicesResponse {
    /// False when speech is disabled or no API key is configured.
    pub available: bool,
    pub default_voice: String,
    pub voices: Vec<String>,
}

/// Request body for `POST /v1/speech:test`.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpeechTestRequest {
    /// Defaults to the configured voice.
    pub voice: Option<String>,
    /// Language of the sample sentence. Defaults to the default language.
    pub language: Option<String>,
}
