use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let documents = Router::new()
        .route("/", get(handlers::documents::list_documents))
        .route("/{name}", get(handlers::documents::get_document));

    let sessions = Router::new()
        .route("/", post(handlers::sessions::create_session))
        .route(
            "/{sessionId}",
            get(handlers::sessions::get_session).patch(handlers::sessions::update_session),
        )
        .route(
            "/{sessionId}/messages",
            post(handlers::sessions::ask).delete(handlers::sessions::clear_messages),
        )
        .route(
            "/{sessionId}/messages/{messageId}/audio",
            get(handlers::sessions::message_audio),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .route("/languages", get(handlers::i18n::list_languages))
        .route("/translations/{lang}", get(handlers::i18n::get_translations))
        .route("/voices", get(handlers::speech::list_voices))
        .route("/speech:test", post(handlers::speech::test_speech))
        .route(
            "/documents:reload",
            post(handlers::documents::reload_documents),
        )
        .nest("/documents", documents)
        .nest("/sessions", sessions)
}
