mod chat;
mod document;

pub use chat::*;
pub use document::*;
