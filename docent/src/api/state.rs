use std::sync::Arc;

use crate::config::Config;
use crate::i18n::Translations;
use crate::library::DocumentLibrary;
use crate::llm::LlmProvider;
use crate::models::SessionSettings;
use crate::processing::DocumentLoader;
use crate::services::AssistantService;
use crate::session::SessionStore;
use crate::speech::SpeechProvider;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub library: DocumentLibrary,
    pub sessions: SessionStore,
    pub translations: Arc<Translations>,
    pub llm: LlmProvider,
    pub speech: SpeechProvider,
    pub assistant: AssistantService,
}

impl AppState {
    pub fn new(
        config: Config,
        translations: Translations,
        llm: LlmProvider,
        speech: SpeechProvider,
    ) -> Self {
        let config = Arc::new(config);
        let translations = Arc::new(translations);

        let library = DocumentLibrary::new(DocumentLoader::new(&config.documents));

        let default_language = if translations.has_language(&config.i18n.default_language) {
            config.i18n.default_language.clone()
        } else {
            crate::i18n::DEFAULT_LANGUAGE.to_string()
        };
        let sessions = SessionStore::new(SessionSettings {
            language: default_language,
            audio_enabled: true,
            voice: speech.default_voice().to_string(),
        });

        let assistant = AssistantService::new(
            llm.clone(),
            Arc::clone(&translations),
            config.documents.max_content_length,
        );

        Self {
            config,
            library,
            sessions,
            translations,
            llm,
            speech,
            assistant,
        }
    }

    /// Fall back to the session default when `language` has no table.
    pub fn resolve_language(&self, language: Option<&str>) -> String {
        match language {
            Some(code) if self.translations.has_language(code) => code.to_string(),
            _ => self.sessions.defaults().language.clone(),
        }
    }
}
