//! Page-level document types: input pages, OCR providers, classification.

use serde::{Deserialize, Serialize};

/// One physical page of OCR output, as delivered by the OCR collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number within the scanned batch.
    pub page_number: u32,

    /// Raw OCR text. May be empty, or a JSON envelope wrapping the
    /// actual text payload depending on the provider.
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }
}

/// OCR engine that produced a page of text.
///
/// Each provider leaves characteristic artifacts in its output; the
/// normalizer keys its repair passes off this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrProvider {
    /// Ollama vision models: page banners, spacing injected around
    /// slashes in dates, labels split across lines.
    Ollama,
    /// Gemini: wraps output in markdown code fences.
    Gemini,
    /// Unrecognized output; normalized with the default (Ollama) repairs.
    Unknown,
}

impl Default for OcrProvider {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Canonicalized page text plus the provider it was normalized for.
///
/// Normalization is idempotent: feeding a `NormalizedText`'s text back
/// through the normalizer is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedText {
    pub text: String,
    pub provider: OcrProvider,
}

/// Logical document type of a settlement page.
///
/// Classification is total: every page gets exactly one value, with
/// `Unknown` as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Remittance,
    SettlementDetail,
    RevenueDistribution,
    AdvanceAdvice,
    CreditDebit,
    PostingTicket,
    Unknown,
}

/// Financial category of a settlement transaction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineType {
    Revenue,
    Advance,
    Deduction,
    Other,
}

/// Map a settlement transaction code to its line type.
///
/// Fixed lookup; codes outside the table are `Other`, never an error.
pub fn line_type_for_code(code: &str) -> LineType {
    match code.to_ascii_uppercase().as_str() {
        "RD" => LineType::Revenue,
        "CM" | "CA" | "POA" => LineType::Advance,
        "MC" | "PT" | "CL" | "CD" | "UA" => LineType::Deduction,
        _ => LineType::Other,
    }
}
