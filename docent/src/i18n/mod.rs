//! UI translations.
//!
//! English is compiled in, as are the Arabic, French and Spanish tables from
//! `translations/`. At startup `<dir>/<lang>.json` files are flat
//! `{"key": "text"}` objects merged over whatever the language already has,
//! so a file may add a language or patch individual strings.

mod english;

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::models::LoadStatus;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Translation files shipped with the binary, as `(code, json)`.
pub const BUNDLED: &[(&str, &str)] = &[
    ("ar", include_str!("../../translations/ar.json")),
    ("fr", include_str!("../../translations/fr.json")),
    ("es", include_str!("../../translations/es.json")),
];

/// Languages the UI can offer, in selector order.
pub const SUPPORTED_LANGUAGES: &[(&str, &str, &str)] = &[
    ("en", "English", "🇺🇸"),
    ("ar", "العربية", "🇸🇦"),
    ("fr", "Français", "🇫🇷"),
    ("es", "Español", "🇪🇸"),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub rtl: bool,
}

pub fn is_rtl(language: &str) -> bool {
    language == "ar"
}

pub fn language_name(code: &str) -> &str {
    SUPPORTED_LANGUAGES
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, name, _)| *name)
        .unwrap_or(code)
}

#[derive(Debug, Clone)]
pub struct Translations {
    tables: HashMap<String, HashMap<String, String>>,
}

impl Default for Translations {
    fn default() -> Self {
        Self::bundled()
    }
}

impl Translations {
    /// English only.
    pub fn builtin() -> Self {
        let english = english::ENGLISH
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let mut tables = HashMap::new();
        tables.insert(DEFAULT_LANGUAGE.to_string(), english);
        Self { tables }
    }

    /// English plus the bundled translation tables.
    pub fn bundled() -> Self {
        let mut translations = Self::builtin();
        for (code, raw) in BUNDLED {
            match Self::parse_table(raw) {
                Ok(table) => {
                    translations.merge(code, table);
                }
                Err(e) => {
                    tracing::error!(language = code, error = %e, "Bundled translations are invalid")
                }
            }
        }
        translations
    }

    /// Bundled tables plus every readable `*.json` file in `dir`.
    /// A missing directory or a malformed file is logged and skipped.
    pub fn load(dir: &Path) -> Self {
        let mut translations = Self::bundled();

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::info!(dir = %dir.display(), error = %e, "No translations directory; using bundled translations");
                return translations;
            }
        };

        let mut files: Vec<_> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect();
        files.sort();

        for path in files {
            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match Self::read_table(&path) {
                Ok(table) => {
                    let count = translations.merge(code, table);
                    tracing::info!(language = code, keys = count, "Loaded translations");
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "Error loading translations");
                }
            }
        }

        translations
    }

    fn read_table(path: &Path) -> Result<HashMap<String, String>> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse_table(&raw)
    }

    /// Non-string values are ignored.
    fn parse_table(raw: &str) -> Result<HashMap<String, String>> {
        let values: HashMap<String, serde_json::Value> = serde_json::from_str(raw)?;
        Ok(values
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(text) => Some((key, text)),
                _ => None,
            })
            .collect())
    }

    /// Merge `table` into `language`; returns the language's key count.
    pub fn merge(&mut self, language: &str, table: HashMap<String, String>) -> usize {
        let entry = self.tables.entry(language.to_string()).or_default();
        entry.extend(table);
        entry.len()
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Supported languages that have a translation table.
    pub fn available_languages(&self) -> Vec<Language> {
        SUPPORTED_LANGUAGES
            .iter()
            .filter(|(code, _, _)| self.has_language(code))
            .map(|(code, name, flag)| Language {
                code: code.to_string(),
                name: name.to_string(),
                flag: flag.to_string(),
                rtl: is_rtl(code),
            })
            .collect()
    }

    /// Look up `key` in `language`, then English, then return the key itself.
    /// `{name}` placeholders are filled from `args`; others stay as written.
    pub fn t(&self, language: &str, key: &str, args: &[(&str, String)]) -> String {
        let text = self
            .tables
            .get(language)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.tables
                    .get(DEFAULT_LANGUAGE)
                    .and_then(|table| table.get(key))
            })
            .map(String::as_str)
            .unwrap_or(key);

        let mut rendered = text.to_string();
        for (name, value) in args {
            rendered = rendered.replace(&format!("{{{name}}}"), value);
        }
        rendered
    }

    /// Every key with its text in `language`, English filling the gaps.
    pub fn table(&self, language: &str) -> BTreeMap<String, String> {
        let mut merged: BTreeMap<String, String> = self
            .tables
            .get(DEFAULT_LANGUAGE)
            .map(|table| table.clone().into_iter().collect())
            .unwrap_or_default();

        if language != DEFAULT_LANGUAGE {
            if let Some(table) = self.tables.get(language) {
                merged.extend(table.clone());
            }
        }
        merged
    }

    /// Status line shown under the document library.
    pub fn load_status(&self, language: &str, status: &LoadStatus) -> String {
        match status {
            LoadStatus::FolderNotFound { folder } => {
                self.t(language, "data_folder_not_found", &[("folder", folder.clone())])
            }
            LoadStatus::NoSupportedFiles { folder, files } => self.t(
                language,
                "no_supported_docs",
                &[("folder", folder.clone()), ("files", files.join(", "))],
            ),
            LoadStatus::AllFailed { failures } => {
                let errors = failures
                    .iter()
                    .map(|failure| format!("{} ({})", failure.file, failure.reason))
                    .collect::<Vec<_>>()
                    .join("; ");
                self.t(language, "failed_to_load", &[("errors", errors)])
            }
            LoadStatus::Partial {
                success,
                total,
                failed,
            } => self.t(
                language,
                "loaded_docs_status",
                &[
                    ("success", success.to_string()),
                    ("total", total.to_string()),
                    ("failed", failed.to_string()),
                ],
            ),
            LoadStatus::AllLoaded { success, total } => self.t(
                language,
                "all_docs_loaded",
                &[("success", success.to_string()), ("total", total.to_string())],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailedLoad;

    fn with_french() -> Translations {
        let mut translations = Translations::builtin();
        translations.merge(
            "fr",
            HashMap::from([
                ("clear_chat".to_string(), "Effacer la discussion".to_string()),
                ("docs_loaded".to_string(), "{count} documents chargés".to_string()),
            ]),
        );
        translations
    }

    #[test]
    fn test_lookup_falls_back_to_english_then_key() {
        let translations = with_french();
        assert_eq!(translations.t("fr", "clear_chat", &[]), "Effacer la discussion");
        assert_eq!(translations.t("fr", "reload_docs", &[]), "Reload Documents");
        assert_eq!(translations.t("de", "clear_chat", &[]), "Clear Chat");
        assert_eq!(translations.t("fr", "no_such_key", &[]), "no_such_key");
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let translations = with_french();
        assert_eq!(
            translations.t("fr", "docs_loaded", &[("count", "3".to_string())]),
            "3 documents chargés"
        );
        assert_eq!(
            translations.t("en", "invalid_request", &[("other", "x".to_string())]),
            "Invalid request: {error}"
        );
    }

    #[test]
    fn test_available_languages_follow_loaded_tables() {
        let translations = with_french();
        let codes: Vec<_> = translations
            .available_languages()
            .into_iter()
            .map(|language| language.code)
            .collect();
        assert_eq!(codes, vec!["en", "fr"]);
    }

    #[test]
    fn test_rtl_only_for_arabic() {
        assert!(is_rtl("ar"));
        assert!(!is_rtl("en"));
        assert!(!is_rtl("fr"));
        assert_eq!(language_name("ar"), "العربية");
        assert_eq!(language_name("xx"), "xx");
    }

    #[test]
    fn test_table_merges_over_english() {
        let table = with_french().table("fr");
        assert_eq!(table["clear_chat"], "Effacer la discussion");
        assert_eq!(table["reload_docs"], "Reload Documents");
    }

    #[test]
    fn test_load_reads_json_files_and_skips_bad_ones() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("es.json"),
            r#"{"clear_chat": "Borrar chat", "count": 3}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("ar.json"), "{not json").unwrap();
        std::fs::write(dir.path().join("xx.json"), r#"{"clear_chat": "Xx"}"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let translations = Translations::load(dir.path());
        assert_eq!(translations.t("es", "clear_chat", &[]), "Borrar chat");
        assert_eq!(translations.t("es", "count", &[]), "count");
        // A broken file leaves the bundled table alone.
        assert_eq!(translations.t("ar", "clear_chat", &[]), "مسح المحادثة");
        // Unknown codes load but are not offered in the selector.
        assert!(translations.has_language("xx"));
        assert_eq!(translations.available_languages().len(), 4);
    }

    #[test]
    fn test_bundled_tables_cover_every_english_key() {
        let translations = Translations::bundled();
        let english = translations.table("en");
        for (code, _) in BUNDLED {
            let table = &translations.tables[*code];
            for key in english.keys() {
                assert!(table.contains_key(key), "{code} is missing {key}");
            }
        }
    }

    #[test]
    fn test_missing_directory_keeps_bundled_languages() {
        let translations = Translations::load(Path::new("/definitely/not/here"));
        let codes: Vec<_> = translations
            .available_languages()
            .into_iter()
            .map(|language| language.code)
            .collect();
        assert_eq!(codes, vec!["en", "ar", "fr", "es"]);
    }

    #[test]
    fn test_load_status_messages() {
        let translations = Translations::builtin();

        assert_eq!(
            translations.load_status(
                "en",
                &LoadStatus::Partial {
                    success: 2,
                    total: 3,
                    failed: 1
                }
            ),
            "Loaded 2 of 3 documents (1 failed)"
        );
        assert_eq!(
            translations.load_status(
                "en",
                &LoadStatus::AllFailed {
                    failures: vec![FailedLoad {
                        file: "a.pdf".to_string(),
                        reason: "No content extracted".to_string(),
                        metadata: None,
                    }]
                }
            ),
            "Failed to load documents: a.pdf (No content extracted)"
        );
        assert_eq!(
            translations.load_status(
                "en",
                &LoadStatus::FolderNotFound {
                    folder: "data".to_string()
                }
            ),
            "Data folder 'data' not found"
        );
    }
}
