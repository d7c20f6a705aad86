use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::{ApiError, OpenAIError},
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
    },
    Client,
};

use crate::{
    config::{parse_llm_provider_model, LlmConfig},
    error::{DocentError, Result},
    llm::provider::CompletionOptions,
};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    api_key: Option<String>,
    model: String,
    timeout_secs: u64,
    max_retries: u32,
}

#[derive(Clone)]
pub struct LlmApiClient {
    client: Client<OpenAIConfig>,
    config: ApiConfig,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_config = ApiConfig::from_llm_config(config);

        let (provider, _) = parse_llm_provider_model(&config.model);
        let needs_api_key = !matches!(
            provider.to_lowercase().as_str(),
            "ollama" | "local" | "lmstudio"
        );

        if needs_api_key && api_config.api_key.is_none() {
            return Err(DocentError::LlmUnavailable(
                "API key required for this provider".to_string(),
            ));
        }

        let openai_config = OpenAIConfig::new()
            .with_api_base(api_config.base_url.clone())
            .with_api_key(api_config.api_key.clone().unwrap_or_default());

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|error| {
                DocentError::Llm(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        // async-openai retries 5xx and 429 on its own schedule. A zero budget
        // turns that off so `max_retries` is the only retry policy.
        let backoff = backoff::ExponentialBackoff {
            max_elapsed_time: Some(Duration::ZERO),
            ..Default::default()
        };

        let client = Client::with_config(openai_config)
            .with_http_client(http_client)
            .with_backoff(backoff);

        Ok(Self {
            client,
            config: api_config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// One system + user exchange. Returns the first choice's text, trimmed.
    pub async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: Option<&CompletionOptions>,
    ) -> Result<String> {
        if user_prompt.trim().is_empty() {
            return Err(DocentError::Validation("Prompt cannot be empty".to_string()));
        }

        let mut last_error: Option<DocentError> = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay_ms = 100 * 2_u64.pow(attempt - 1);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }

            let request = self.build_request(system_prompt, user_prompt, options)?;

            match self.client.chat().create(request).await {
                Ok(response) => return Self::extract_content(response),
                Err(error) => {
                    if let Some(classified) = Self::classify_error(&error) {
                        return Err(classified);
                    }

                    let retryable = Self::is_retryable(&error);
                    let mapped_error = Self::map_openai_error(error);

                    if retryable && attempt < self.config.max_retries {
                        tracing::warn!(attempt, error = %mapped_error, "Retrying LLM request");
                        last_error = Some(mapped_error);
                        continue;
                    }

                    return Err(mapped_error);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| DocentError::Llm("LLM completion failed after retries".to_string())))
    }

    fn build_request(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: Option<&CompletionOptions>,
    ) -> Result<CreateChatCompletionRequest> {
        let mut messages = Vec::new();

        if !system_prompt.trim().is_empty() {
            messages.push(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|error| {
                        DocentError::Validation(format!("Invalid system prompt: {error}"))
                    })?
                    .into(),
            );
        }

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|error| DocentError::Validation(format!("Invalid user prompt: {error}")))?
                .into(),
        );

        let mut request = CreateChatCompletionRequestArgs::default();
        request.model(self.config.model.clone()).messages(messages);

        if let Some(options) = options {
            if let Some(temperature) = options.temperature {
                request.temperature(temperature);
            }
            if let Some(max_tokens) = options.max_tokens {
                request.max_tokens(max_tokens);
            }
        }

        request.build().map_err(|error| {
            DocentError::Validation(format!("Invalid LLM completion request: {error}"))
        })
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DocentError::Llm("LLM response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(DocentError::Llm(
                "LLM response contained empty content".to_string(),
            ));
        }

        Ok(trimmed.to_string())
    }

    fn is_retryable(error: &OpenAIError) -> bool {
        match error {
            OpenAIError::ApiError(api_error) => {
                api_error.r#type.is_none() && api_error.code.is_none()
            }
            OpenAIError::Reqwest(reqwest_error) => reqwest_error
                .status()
                .map(|status| status.is_server_error())
                .unwrap_or(true),
            _ => false,
        }
    }

    /// Rate limit, authentication and invalid-request failures are never
    /// retried and get their own error variants.
    fn classify_error(error: &OpenAIError) -> Option<DocentError> {
        match error {
            OpenAIError::Reqwest(reqwest_error) => {
                let status = reqwest_error.status()?;
                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    Some(DocentError::LlmRateLimit { retry_after: None })
                } else if status == reqwest::StatusCode::UNAUTHORIZED
                    || status == reqwest::StatusCode::FORBIDDEN
                {
                    Some(DocentError::LlmAuth(reqwest_error.to_string()))
                } else if status == reqwest::StatusCode::BAD_REQUEST {
                    Some(DocentError::LlmInvalidRequest(reqwest_error.to_string()))
                } else {
                    None
                }
            }
            OpenAIError::ApiError(api_error) if Self::is_rate_limit_api_error(api_error) => {
                Some(DocentError::LlmRateLimit { retry_after: None })
            }
            OpenAIError::ApiError(api_error) if Self::is_auth_api_error(api_error) => {
                Some(DocentError::LlmAuth(api_error.message.clone()))
            }
            OpenAIError::ApiError(api_error) if Self::is_invalid_request_api_error(api_error) => {
                Some(DocentError::LlmInvalidRequest(api_error.message.clone()))
            }
            _ => None,
        }
    }

    fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("rate limit")
            || message.contains("too many requests")
            || error_type.contains("rate_limit")
            || code.contains("rate_limit")
            || error_type == "insufficient_quota"
            || code == "insufficient_quota"
    }

    fn is_auth_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
        let code = api_error.code.clone().unwrap_or_default().to_lowercase();

        message.contains("unauthorized")
            || message.contains("forbidden")
            || message.contains("authentication")
            || message.contains("api key")
            || code.contains("invalid_api_key")
            || code.contains("authentication")
            || error_type.contains("authentication")
    }

    fn is_invalid_request_api_error(api_error: &ApiError) -> bool {
        let message = api_error.message.to_lowercase();
        let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();

        error_type == "invalid_request_error" || message.contains("invalid")
    }

    fn map_openai_error(error: OpenAIError) -> DocentError {
        match error {
            OpenAIError::Reqwest(reqwest_error) => {
                DocentError::Llm(format!("LLM request failed: {reqwest_error}"))
            }
            OpenAIError::ApiError(api_error) => {
                DocentError::Llm(format!("LLM API error: {api_error}"))
            }
            OpenAIError::JSONDeserialize(err) => {
                DocentError::Llm(format!("Failed to parse LLM response: {err}"))
            }
            OpenAIError::InvalidArgument(message) => DocentError::LlmInvalidRequest(message),
            other => DocentError::Llm(other.to_string()),
        }
    }
}

impl ApiConfig {
    fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider, model) = parse_llm_provider_model(&config.model);

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(provider).to_string());

        let normalized_model = if provider.eq_ignore_ascii_case("local") {
            config.model.clone()
        } else {
            model.to_string()
        };

        Self {
            base_url,
            api_key: config.api_key.clone(),
            model: normalized_model,
            timeout_secs: config.timeout_secs,
            max_retries: config.max_retries,
        }
    }
}

fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENAI_BASE_URL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(message: &str, r#type: Option<&str>, code: Option<&str>) -> ApiError {
        ApiError {
            message: message.to_string(),
            r#type: r#type.map(String::from),
            param: None,
            code: code.map(String::from),
        }
    }

    #[test]
    fn test_default_model_targets_openai() {
        let config = ApiConfig::from_llm_config(&LlmConfig::default());
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.base_url, OPENAI_BASE_URL);
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_unprefixed_model_keeps_full_name() {
        let config = ApiConfig::from_llm_config(&LlmConfig {
            model: "gpt-4o-mini".to_string(),
            base_url: Some("http://localhost:9000/v1".to_string()),
            ..Default::default()
        });
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "http://localhost:9000/v1");
    }

    #[test]
    fn test_openai_requires_api_key() {
        let result = LlmApiClient::new(&LlmConfig::default());
        assert!(matches!(result, Err(DocentError::LlmUnavailable(_))));
    }

    #[test]
    fn test_request_carries_options() {
        let client = LlmApiClient::new(&LlmConfig {
            model: "ollama/llama3".to_string(),
            ..Default::default()
        })
        .expect("client should be created");

        let options = CompletionOptions {
            temperature: Some(0.3),
            max_tokens: Some(1500),
        };
        let request = client
            .build_request("system", "question", Some(&options))
            .expect("request should build");

        assert_eq!(request.model, "llama3");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.3));
        #[allow(deprecated)]
        let max_tokens = request.max_tokens;
        assert_eq!(max_tokens, Some(1500));
    }

    #[test]
    fn test_blank_system_prompt_is_omitted() {
        let client = LlmApiClient::new(&LlmConfig {
            model: "ollama/llama3".to_string(),
            ..Default::default()
        })
        .expect("client should be created");

        let request = client
            .build_request("  ", "question", None)
            .expect("request should build");
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn test_classify_api_errors() {
        let quota = OpenAIError::ApiError(api_error(
            "You exceeded your current quota",
            Some("insufficient_quota"),
            Some("insufficient_quota"),
        ));
        assert!(matches!(
            LlmApiClient::classify_error(&quota),
            Some(DocentError::LlmRateLimit { .. })
        ));

        let auth = OpenAIError::ApiError(api_error(
            "Incorrect API key provided",
            Some("invalid_request_error"),
            Some("invalid_api_key"),
        ));
        assert!(matches!(
            LlmApiClient::classify_error(&auth),
            Some(DocentError::LlmAuth(_))
        ));

        let invalid = OpenAIError::ApiError(api_error(
            "This model's maximum context length is 4097 tokens",
            Some("invalid_request_error"),
            Some("context_length_exceeded"),
        ));
        assert!(matches!(
            LlmApiClient::classify_error(&invalid),
            Some(DocentError::LlmInvalidRequest(_))
        ));

        let server = OpenAIError::ApiError(api_error("The server had an error", None, None));
        assert!(LlmApiClient::classify_error(&server).is_none());
        assert!(LlmApiClient::is_retryable(&server));
    }
}
