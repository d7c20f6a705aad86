use tracing::{info, warn};

use crate::config::SpeechConfig;
use crate::error::{DocentError, Result};

use super::api::SpeechClient;
use super::cache::AudioFileCache;
use super::cleanup::clean_for_speech;

#[derive(Debug, Clone)]
enum SpeechBackend {
    Api { client: SpeechClient },
    Unavailable { reason: String },
}

#[derive(Debug, Clone)]
pub struct SpeechProvider {
    backend: SpeechBackend,
    cache: Option<AudioFileCache>,
    config: SpeechConfig,
}

impl SpeechProvider {
    pub fn new(config: &SpeechConfig) -> Self {
        let backend = if !config.enabled {
            SpeechBackend::Unavailable {
                reason: "Speech is disabled".to_string(),
            }
        } else {
            match SpeechClient::new(config) {
                Ok(client) => {
                    info!(model = %config.model, "Speech API backend initialized");
                    SpeechBackend::Api { client }
                }
                Err(e) => {
                    let reason = format!("Speech API backend unavailable: {e}");
                    warn!("{}", reason);
                    SpeechBackend::Unavailable { reason }
                }
            }
        };

        let cache = config
            .cache_dir
            .as_ref()
            .map(|dir| AudioFileCache::new(dir.clone(), &config.model, &config.format));

        Self {
            backend,
            cache,
            config: config.clone(),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: SpeechBackend::Unavailable {
                reason: reason.to_string(),
            },
            cache: None,
            config: SpeechConfig::default(),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, SpeechBackend::Unavailable { .. })
    }

    pub fn voices(&self) -> &[String] {
        &self.config.voices
    }

    pub fn default_voice(&self) -> &str {
        &self.config.voice
    }

    pub fn is_known_voice(&self, voice: &str) -> bool {
        self.config.voices.iter().any(|v| v == voice)
    }

    /// MIME type of the audio this provider returns.
    pub fn content_type(&self) -> &'static str {
        match self.config.format.as_str() {
            "opus" => "audio/ogg",
            "aac" => "audio/aac",
            "flac" => "audio/flac",
            "wav" => "audio/wav",
            "pcm" => "audio/L16",
            _ => "audio/mpeg",
        }
    }

    /// Clean `text` for reading aloud and synthesize it, going through the
    /// disk cache when one is configured.
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>> {
        let client = match &self.backend {
            SpeechBackend::Api { client } => client,
            SpeechBackend::Unavailable { reason } => {
                return Err(DocentError::SpeechUnavailable(reason.clone()))
            }
        };

        let cleaned = clean_for_speech(text);
        if cleaned.is_empty() {
            return Err(DocentError::Validation(
                "Nothing to read aloud after cleanup".to_string(),
            ));
        }

        if let Some(cache) = &self.cache {
            if let Some(audio) = cache.get(voice, &cleaned).await {
                tracing::debug!(voice, "Speech cache hit");
                return Ok(audio);
            }
        }

        let audio = client.synthesize(&cleaned, voice).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(voice, &cleaned, &audio).await {
                warn!(error = %e, "Failed to write audio cache entry");
            }
        }

        Ok(audio)
    }
}
