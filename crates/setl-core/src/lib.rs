//! Core library for carrier settlement OCR parsing.
//!
//! This crate provides:
//! - Provider-aware normalization of noisy OCR page text
//! - Document-type classification (remittance, settlement detail,
//!   revenue distribution, posting ticket, credit/debit, advance)
//! - Per-document field extraction via ordered strategy chains
//! - Check-total reconciliation and settlement-week batch metadata
//!
//! The engine is purely functional: no I/O, no shared mutable state, and
//! no exceptions for missing fields. Extractors return partial results
//! plus a list of non-fatal error strings.

pub mod batch;
pub mod error;
pub mod extract;
pub mod models;
pub mod text;
pub mod validate;

pub use error::{ParseError, Result};
pub use extract::{first_match, parse_batch, parse_page, RevenueIndex, Strategy, StrategyHit};
pub use models::{
    line_type_for_code, AdvanceResult, BatchMetadata, CreditDebitResult, DocumentType, LineType,
    NormalizedText, OcrProvider, PageResult, PageText, ParsedDocument, ParserConfig,
    PaymentMethod, PostingResult, RemittanceResult, RevenueLine, RevenueResult, SettlementLine,
    SettlementResult,
};
pub use text::{classify, detect_provider, normalize, normalize_for, NormalizeMode};
pub use validate::reconcile_check_total;
