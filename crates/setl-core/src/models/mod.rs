//! Data models for settlement document parsing.

pub mod config;
pub mod document;
pub mod records;

pub use config::ParserConfig;
pub use document::{
    line_type_for_code, DocumentType, LineType, NormalizedText, OcrProvider, PageText,
};
pub use records::*;
