use serde::Deserialize;
use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

/// Parse a comma-separated env var into trimmed, non-empty items.
fn parse_env_list(var: &str, default: &[&str]) -> Vec<String> {
    match env::var(var) {
        Ok(val) if !val.trim().is_empty() => val
            .split(',')
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        _ => default.iter().map(|item| item.to_string()).collect(),
    }
}

/// First non-empty value among the given env vars.
fn env_first(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|var| env::var(var).ok())
        .find(|val| !val.trim().is_empty())
}

pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];
pub const DEFAULT_EXTENSIONS: &[&str] = &[".pdf", ".docx"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub documents: DocumentsConfig,
    pub llm: Option<LlmConfig>,
    pub speech: SpeechConfig,
    pub i18n: I18nConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub name: String,
    pub tagline: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentsConfig {
    pub data_folder: PathBuf,
    /// Lowercase extensions including the leading dot.
    pub supported_extensions: Vec<String>,
    /// Character budget for all document text sent in one prompt.
    pub max_content_length: usize,
    pub preview_length: usize,
    /// Minimum cleaned length for a DOCX extraction method to be accepted.
    pub min_docx_chars: usize,
}

/// Chat completion settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Text-to-speech settings
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub model: String,
    pub voice: String,
    pub voices: Vec<String>,
    pub format: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub cache_dir: Option<PathBuf>,
    pub max_input_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct I18nConfig {
    pub translations_dir: PathBuf,
    pub default_language: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 60,
            max_retries: 0,
            max_tokens: 1500,
            temperature: 0.3,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            voices: DEFAULT_VOICES.iter().map(|v| v.to_string()).collect(),
            format: "mp3".to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 60,
            cache_dir: None,
            max_input_chars: 4096,
        }
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            data_folder: PathBuf::from("data"),
            supported_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_content_length: 15000,
            preview_length: 800,
            min_docx_chars: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let openai_key = env_first(&["OPENAI_API_KEY"]);

        Self {
            app: AppConfig {
                name: env::var("DOCENT_APP_NAME")
                    .unwrap_or_else(|_| "AI Multi-Document Assistant".to_string()),
                tagline: env::var("DOCENT_TAGLINE").unwrap_or_else(|_| "Powered by AI".to_string()),
            },
            server: ServerConfig {
                host: env::var("DOCENT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: parse_env_or("DOCENT_PORT", 8501),
            },
            documents: DocumentsConfig {
                data_folder: env::var("DATA_FOLDER")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("data")),
                supported_extensions: parse_env_list("SUPPORTED_EXTENSIONS", DEFAULT_EXTENSIONS)
                    .into_iter()
                    .map(normalize_extension)
                    .collect(),
                max_content_length: parse_env_or("MAX_CONTENT_LENGTH", 15000),
                preview_length: parse_env_or("PREVIEW_LENGTH", 800),
                min_docx_chars: parse_env_or("MIN_DOCX_CHARS", 50),
            },
            llm: {
                let api_key = env_first(&["LLM_API_KEY"]).or_else(|| openai_key.clone());
                let model = env::var("LLM_MODEL").ok();

                // No key and no explicit model means there is nothing to talk to.
                if api_key.is_none() && model.is_none() {
                    None
                } else {
                    Some(LlmConfig {
                        model: model.unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
                        api_key,
                        base_url: env::var("LLM_BASE_URL").ok(),
                        timeout_secs: parse_env_or("LLM_TIMEOUT", 60),
                        max_retries: parse_env_or("LLM_MAX_RETRIES", 0),
                        max_tokens: parse_env_or("LLM_MAX_TOKENS", 1500),
                        temperature: parse_env_or("LLM_TEMPERATURE", 0.3),
                    })
                }
            },
            speech: SpeechConfig {
                enabled: parse_env_or("SPEECH_ENABLED", true),
                model: env::var("SPEECH_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
                voice: env::var("SPEECH_VOICE").unwrap_or_else(|_| "alloy".to_string()),
                voices: parse_env_list("SPEECH_VOICES", DEFAULT_VOICES),
                format: env::var("SPEECH_FORMAT").unwrap_or_else(|_| "mp3".to_string()),
                api_key: env_first(&["SPEECH_API_KEY"]).or(openai_key),
                base_url: env::var("SPEECH_BASE_URL").ok(),
                timeout_secs: parse_env_or("SPEECH_TIMEOUT", 60),
                cache_dir: env::var("SPEECH_CACHE_DIR")
                    .ok()
                    .filter(|dir| !dir.trim().is_empty())
                    .map(PathBuf::from),
                max_input_chars: parse_env_or("SPEECH_MAX_INPUT_CHARS", 4096),
            },
            i18n: I18nConfig {
                translations_dir: env::var("TRANSLATIONS_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("translations")),
                default_language: env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string()),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Lowercase an extension and make sure it carries a leading dot.
pub fn normalize_extension(ext: String) -> String {
    let lower = ext.trim().to_lowercase();
    if lower.starts_with('.') {
        lower
    } else {
        format!(".{lower}")
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
