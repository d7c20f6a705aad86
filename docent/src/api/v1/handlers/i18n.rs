use axum::extract::{Path, State};

use crate::api::v1::dto::{LanguageResponse, LanguagesResponse, TranslationsResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::i18n::is_rtl;

/// `GET /api/v1/languages`
#[utoipa::path(
    get,
    path = "/api/v1/languages",
    tag = "i18n",
    operation_id = "i18n.languages",
    responses(
        (status = 200, description = "Languages with a translation table", body = LanguagesResponse),
    )
)]
pub async fn list_languages(State(state): State<AppState>) -> ApiResponse<LanguagesResponse> {
    ApiResponse::success(LanguagesResponse {
        default_language: state.sessions.defaults().language.clone(),
        languages: state
            .translations
            .available_languages()
            .into_iter()
            .map(LanguageResponse::from)
            .collect(),
    })
}

/// `GET /api/v1/translations/{lang}`
#[utoipa::path(
    get,
    path = "/api/v1/translations/{lang}",
    tag = "i18n",
    operation_id = "i18n.translations",
    params(("lang" = String, Path, description = "Language code")),
    responses(
        (status = 200, description = "All UI strings for the language", body = TranslationsResponse),
        (status = 404, description = "No translations for the language", body = ApiError),
    )
)]
pub async fn get_translations(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> ApiResponse<TranslationsResponse> {
    if !state.translations.has_language(&lang) {
        return ApiResponse::error(ErrorCode::NotFound, format!("Language {lang} not found"));
    }

    ApiResponse::success(TranslationsResponse {
        rtl: is_rtl(&lang),
        strings: state.translations.table(&lang),
        language: lang,
    })
}
