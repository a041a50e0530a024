//! Error types for the setl-core library.
//!
//! Extraction misses are not errors: every extractor collects descriptive
//! strings into its result's `errors` vector and keeps going. The variants
//! here cover the few conditions that genuinely abort a call.

use thiserror::Error;

/// Main error type for the setl library.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The page text was empty or whitespace-only after envelope unwrapping.
    #[error("page {0} has no text content")]
    EmptyPage(u32),

    /// Configuration value outside its valid range.
    #[error("invalid configuration: {field}: {reason}")]
    Config { field: String, reason: String },
}

/// Result type for the setl library.
pub type Result<T> = std::result::Result<T, ParseError>;
