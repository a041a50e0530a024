//! Provider-aware text canonicalization.
//!
//! Downstream field regexes assume one canonical text shape per document
//! family. Single-field documents get the aggressive pass; tabular
//! documents keep their column spacing because position carries meaning
//! for the row parsers. Both passes are pure, idempotent, and never
//! fail; the worst case is returning the input unchanged.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use super::provider::detect_provider;
use crate::models::{DocumentType, NormalizedText, OcrProvider};

/// Which canonicalization pass to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Collapse intra-line whitespace runs and rejoin known split labels.
    Aggressive,
    /// Trim line ends only; column alignment is preserved.
    Preserving,
}

/// Normalization mode for a classified document type.
pub fn mode_for(document_type: DocumentType) -> NormalizeMode {
    match document_type {
        DocumentType::SettlementDetail | DocumentType::RevenueDistribution => {
            NormalizeMode::Preserving
        }
        _ => NormalizeMode::Aggressive,
    }
}

lazy_static! {
    static ref CODE_FENCE_LINE: Regex = Regex::new(r"(?m)^\s*```[a-z]*\s*$").unwrap();
    static ref PAGE_BANNER: Regex =
        Regex::new(r"(?m)^\s*-{2,}\s*Page\s+\d+\s*-{2,}\s*$").unwrap();
    static ref SPACED_SLASH: Regex = Regex::new(r"(\d)[ \t]*/[ \t]*(\d)").unwrap();
    static ref INNER_RUN: Regex = Regex::new(r"[ \t]{2,}").unwrap();
    static ref BLANK_RUN: Regex = Regex::new(r"\n{3,}").unwrap();

    // Labels the OCR engines are known to split across a line break.
    static ref AGGRESSIVE_SPLITS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\bPAYMENT[ \t]*\n[ \t]*ADVICE\b").unwrap(), "PAYMENT ADVICE"),
        (Regex::new(r"(?i)\bREQUEST[ \t]+FOR[ \t]*\n[ \t]*ADVANCE\b").unwrap(), "REQUEST FOR ADVANCE"),
        (Regex::new(r"(?i)\bTOTAL[ \t]*\n[ \t]*CHARGE\b").unwrap(), "TOTAL CHARGE"),
        (Regex::new(r"(?i)\bCHECK[ \t]*\n[ \t]*(NUMBER|NO\b\.?)").unwrap(), "CHECK $1"),
        (Regex::new(r"(?i)\bCASH[ \t]*\n[ \t]*ADVANCE\b").unwrap(), "CASH ADVANCE"),
    ];

    static ref PRESERVING_SPLITS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"(?i)\bSETTLEMENT[ \t]*\n[ \t]*DETAIL\b").unwrap(), "SETTLEMENT DETAIL"),
        (Regex::new(r"(?i)\bCHECK[ \t]*\n[ \t]*TOTAL\b").unwrap(), "CHECK TOTAL"),
        (Regex::new(r"(?i)\bNET[ \t]*\n[ \t]*BALANCE\b").unwrap(), "NET BALANCE"),
    ];
}

/// Canonicalize page text. When `provider` is `None` it is detected from
/// the text itself; `Unknown` gets the default (Ollama) repairs.
pub fn normalize(
    text: &str,
    provider: Option<OcrProvider>,
    mode: NormalizeMode,
) -> NormalizedText {
    let provider = provider.unwrap_or_else(|| detect_provider(text));
    debug!(?provider, ?mode, "normalizing page text");

    let mut out = text.to_string();

    if provider == OcrProvider::Gemini {
        out = CODE_FENCE_LINE.replace_all(&out, "").into_owned();
    }
    out = PAGE_BANNER.replace_all(&out, "").into_owned();
    out = SPACED_SLASH.replace_all(&out, "$1/$2").into_owned();

    let splits = match mode {
        NormalizeMode::Aggressive => &*AGGRESSIVE_SPLITS,
        NormalizeMode::Preserving => &*PRESERVING_SPLITS,
    };
    for (pattern, joined) in splits.iter() {
        out = pattern.replace_all(&out, *joined).into_owned();
    }

    out = match mode {
        NormalizeMode::Aggressive => out
            .lines()
            .map(|line| INNER_RUN.replace_all(line.trim(), " ").into_owned())
            .collect::<Vec<_>>()
            .join("\n"),
        NormalizeMode::Preserving => out
            .lines()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n"),
    };

    out = BLANK_RUN.replace_all(&out, "\n\n").into_owned();
    let out = out.trim_matches('\n').to_string();

    NormalizedText {
        text: out,
        provider,
    }
}

/// Normalize for a classified document type, choosing the mode that its
/// extractor expects.
pub fn normalize_for(
    document_type: DocumentType,
    text: &str,
    provider: Option<OcrProvider>,
) -> NormalizedText {
    normalize(text, provider, mode_for(document_type))
}
