mod loader;

pub mod extractors;
pub mod text;

pub use loader::{DocumentLoader, LoadReport};
pub use text::{clean_text, count_words, format_file_size, truncate_chars};
