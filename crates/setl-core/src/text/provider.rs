//! OCR provider detection.
//!
//! Each vision engine leaves recognizable artifacts in its text output.
//! Detection happens once per page and the result drives which repair
//! passes the normalizer applies; scattering provider string checks
//! through the extractors is deliberately avoided.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::models::OcrProvider;

lazy_static! {
    // Ollama injects whitespace around the slashes of dates.
    static ref SPACED_SLASH: Regex = Regex::new(r"\d\s+/\s*\d|\d\s*/\s+\d").unwrap();

    // Page banner emitted by the Ollama OCR pipeline between pages.
    static ref PAGE_BANNER: Regex = Regex::new(r"(?m)^\s*-{2,}\s*Page\s+\d+\s*-{2,}\s*$").unwrap();
}

/// Inspect page text for provider-specific signatures. Total: ambiguous
/// or unmarked text yields `Unknown`, which the normalizer treats as the
/// default provider.
pub fn detect_provider(text: &str) -> OcrProvider {
    if text.contains("```") {
        debug!("provider detected: gemini (code fence)");
        return OcrProvider::Gemini;
    }

    if PAGE_BANNER.is_match(text) || SPACED_SLASH.is_match(text) {
        debug!("provider detected: ollama");
        return OcrProvider::Ollama;
    }

    OcrProvider::Unknown
}
