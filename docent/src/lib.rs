pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod library;
pub mod llm;
pub mod models;
pub mod processing;
pub mod scaffold;
pub mod services;
pub mod session;
pub mod speech;

pub use config::Config;
pub use error::{DocentError, Result};
