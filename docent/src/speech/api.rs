use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::{
    config::SpeechConfig,
    error::{DocentError, Result},
    processing::truncate_chars,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Clone)]
pub struct SpeechClient {
    client: Client,
    config: SpeechConfig,
}

impl SpeechClient {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(DocentError::SpeechUnavailable(
                "API key required for speech API".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DocentError::Speech(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Synthesize `text` with `voice`; returns the encoded audio bytes.
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(DocentError::Validation(
                "Speech input cannot be empty".to_string(),
            ));
        }

        let input = truncate_chars(text, self.config.max_input_chars);
        let body = SpeechRequest {
            model: &self.config.model,
            voice,
            input,
            response_format: &self.config.format,
        };

        let base_url = self.config.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
        let url = format!("{}/audio/speech", base_url.trim_end_matches('/'));

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| DocentError::SpeechUnavailable("API key not configured".to_string()))?;

        debug!(url = %url, voice, chars = input.chars().count(), "Sending speech request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DocentError::Speech("Request timeout".to_string())
                } else {
                    DocentError::Speech(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        debug!("Speech response status: {}", status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());

            return Err(Self::map_http_error(status, &error_body));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| DocentError::Speech(format!("Failed to read audio response: {e}")))?;

        if audio.is_empty() {
            return Err(DocentError::Speech(
                "Speech response contained no audio".to_string(),
            ));
        }

        Ok(audio.to_vec())
    }

    fn map_http_error(status: StatusCode, error_body: &str) -> DocentError {
        match status {
            StatusCode::UNAUTHORIZED => DocentError::Speech(format!(
                "Authentication failed (401): Invalid API key. Error: {error_body}"
            )),
            StatusCode::TOO_MANY_REQUESTS => DocentError::Speech(format!(
                "Rate limit exceeded (429): Too many requests. Error: {error_body}"
            )),
            status if status.is_server_error() => DocentError::Speech(format!(
                "Server error ({status}): The speech service encountered an error. Error: {error_body}"
            )),
            _ => DocentError::Speech(format!("Speech API error ({status}): {error_body}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn test_config(base_url: Option<String>) -> SpeechConfig {
        SpeechConfig {
            api_key: Some("test-api-key".to_string()),
            base_url,
            timeout_secs: 10,
            ..SpeechConfig::default()
        }
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = SpeechConfig {
            api_key: None,
            ..SpeechConfig::default()
        };
        let result = SpeechClient::new(&config);
        assert!(matches!(result, Err(DocentError::SpeechUnavailable(_))));
    }

    #[tokio::test]
    async fn test_synthesize_sends_expected_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "tts-1",
                "voice": "nova",
                "input": "Hello there",
                "response_format": "mp3"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "audio/mpeg")
                    .set_body_bytes(b"ID3fake-mp3".to_vec()),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = SpeechClient::new(&test_config(Some(mock_server.uri()))).unwrap();
        let audio = client.synthesize("Hello there", "nova").await.unwrap();
        assert_eq!(audio, b"ID3fake-mp3".to_vec());
    }

    #[tokio::test]
    async fn test_input_is_truncated_to_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .and(body_partial_json(serde_json::json!({ "input": "abcde" })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"audio".to_vec()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = SpeechConfig {
            max_input_chars: 5,
            ..test_config(Some(mock_server.uri()))
        };
        let client = SpeechClient::new(&config).unwrap();
        assert!(client.synthesize("abcdefghij", "alloy").await.is_ok());
    }

    #[tokio::test]
    async fn test_auth_error_is_mapped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&mock_server)
            .await;

        let client = SpeechClient::new(&test_config(Some(mock_server.uri()))).unwrap();
        let err = client.synthesize("Hello", "alloy").await.unwrap_err();
        match err {
            DocentError::Speech(message) => assert!(message.contains("401")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let client = SpeechClient::new(&test_config(None)).unwrap();
        let err = client.synthesize("   ", "alloy").await.unwrap_err();
        assert!(matches!(err, DocentError::Validation(_)));
    }
}
