mod api;
mod cache;
mod cleanup;
mod provider;

pub use api::SpeechClient;
pub use cache::AudioFileCache;
pub use cleanup::clean_for_speech;
pub use provider::SpeechProvider;
