use std::sync::Arc;

use crate::error::DocentError;
use crate::i18n::Translations;
use crate::llm::prompts::{build_document_context, document_qa_system_prompt};
use crate::llm::{is_greeting, LlmProvider};
use crate::models::Document;
use crate::processing::LoadReport;

/// Names listed in the greeting reply before falling back to "and more".
const GREETING_NAME_LIMIT: usize = 3;

/// Answers chat questions from the loaded documents.
///
/// `answer` never fails: problems with the model API come back as
/// localized chat text so the conversation can continue.
#[derive(Clone)]
pub struct AssistantService {
    llm: LlmProvider,
    translations: Arc<Translations>,
    max_content_length: usize,
}

impl AssistantService {
    pub fn new(llm: LlmProvider, translations: Arc<Translations>, max_content_length: usize) -> Self {
        Self {
            llm,
            translations,
            max_content_length,
        }
    }

    pub fn llm(&self) -> &LlmProvider {
        &self.llm
    }

    pub async fn answer(&self, question: &str, report: &LoadReport, language: &str) -> String {
        let t = |key: &str, args: &[(&str, String)]| self.translations.t(language, key, args);

        if is_greeting(question) {
            return self.greeting(report, language);
        }

        if !self.llm.is_available() {
            return format!("🔑 **{}**", t("api_key_missing", &[]));
        }

        if !report.is_loaded() {
            return format!("📄 **{}**", t("no_docs_error", &[]));
        }

        let documents: Vec<&Document> = report.documents.values().collect();
        let context = build_document_context(&documents, self.max_content_length);
        let system_prompt =
            document_qa_system_prompt(language, &context.documents_info, &context.content);

        tracing::debug!(
            documents = documents.len(),
            context_chars = context.content.chars().count(),
            language,
            "Asking model"
        );

        match self.llm.chat(&system_prompt, question, None).await {
            Ok(answer) => answer,
            Err(DocentError::LlmRateLimit { .. }) => {
                format!("⚠️ **{}**", t("rate_limit_error", &[]))
            }
            Err(DocentError::LlmAuth(_)) => format!("🔑 **{}**", t("auth_error", &[])),
            Err(DocentError::LlmUnavailable(_)) => {
                format!("🔑 **{}**", t("api_key_missing", &[]))
            }
            Err(e @ DocentError::LlmInvalidRequest(_)) => {
                tracing::warn!(error = %e, "Model rejected the request");
                format!("❌ **{}**", t("invalid_request", &[("error", e.to_string())]))
            }
            Err(e) => {
                tracing::error!(error = %e, "Error generating AI response");
                format!("❌ **{}**", t("response_error", &[("error", e.to_string())]))
            }
        }
    }

    fn greeting(&self, report: &LoadReport, language: &str) -> String {
        let names: Vec<&str> = report
            .documents
            .keys()
            .take(GREETING_NAME_LIMIT)
            .map(String::as_str)
            .collect();
        let mut doc_list = names.join(", ");
        if report.documents.len() > GREETING_NAME_LIMIT {
            doc_list.push(' ');
            doc_list.push_str(&self.translations.t(language, "and_more", &[]));
        }

        self.translations.t(
            language,
            "hello_response",
            &[
                ("app_name", self.translations.t(language, "app_title", &[])),
                ("doc_count", report.documents.len().to_string()),
                ("doc_list", doc_list),
            ],
        )
    }
}
