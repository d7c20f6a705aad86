use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocentError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },

    #[error("LLM authentication failed: {0}")]
    LlmAuth(String),

    #[error("LLM rejected the request: {0}")]
    LlmInvalidRequest(String),

    #[error("Speech error: {0}")]
    Speech(String),

    #[error("Speech unavailable: {0}")]
    SpeechUnavailable(String),
}

pub type Result<T> = std::result::Result<T, DocentError>;
