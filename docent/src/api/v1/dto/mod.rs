//! v1 API Data Transfer Objects.
//!
//! These types define the wire format for the v1 REST API. They are kept
//! separate from the domain models in `src/models/` and handle
//! serialization and domain-model conversion.

pub mod documents;
pub mod i18n;
pub mod sessions;
pub mod speech;

pub use documents::*;
pub use i18n::*;
pub use sessions::*;
pub use speech::*;
