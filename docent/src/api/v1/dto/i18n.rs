//! Language and translation DTOs for the v1 API.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::i18n::Language;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResponse {
    pub code: String,
    /// Name in the language itself, e.g. `Français`.
    pub name: String,
    pub flag: String,
    pub rtl: bool,
}

impl From<Language> for LanguageResponse {
    fn from(language: Language) -> Self {
        Self {
            code: language.code,
            name: language.name,
            flag: language.flag,
            rtl: language.rtl,
        }
    }
}

/// Response for `GET /v1/languages`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguagesResponse {
    pub default_language: String,
    pub languages: Vec<LanguageResponse>,
}

/// Response for `GET /v1/translations/{lang}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationsResponse {
    pub language: String,
    pub rtl: bool,
    /// Every UI key; untranslated keys carry the English text.
    pub strings: BTreeMap<String, String>,
}
