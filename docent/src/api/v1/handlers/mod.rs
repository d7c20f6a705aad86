pub mod documents;
pub(crate) mod health;
pub mod i18n;
pub mod sessions;
pub mod speech;

pub use health::health_check;
