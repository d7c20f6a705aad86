mod api;
pub mod greeting;
pub mod prompts;
mod provider;

pub use api::LlmApiClient;
pub use greeting::is_greeting;
pub use provider::{CompletionOptions, LlmBackend, LlmProvider};
