//! Page-level orchestration: classify, normalize, dispatch, and the
//! two-pass revenue-to-settlement join.
//!
//! Everything here is pure string processing; parsing the same page
//! twice yields the same result, and pages within one pass carry no
//! shared state, so callers may fan pages out across threads freely.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, info};

use super::{advance, credit_debit, posting, remittance, revenue, settlement};
use crate::error::{ParseError, Result};
use crate::models::{
    DocumentType, PageResult, PageText, ParsedDocument, ParserConfig, RevenueResult,
    SettlementResult, TripLinkage,
};
use crate::text::{classify, detect_provider, normalize_for};

/// Some providers return a JSON envelope instead of plain text. Pull the
/// text payload out of the known envelope shapes; anything else passes
/// through untouched.
pub fn unwrap_envelope(text: &str) -> Cow<'_, str> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('"')) {
        return Cow::Borrowed(text);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => {
            for key in ["text", "response", "content"] {
                if let Some(Value::String(payload)) = map.get(key) {
                    debug!(key, "unwrapped JSON envelope");
                    return Cow::Owned(payload.clone());
                }
            }
            Cow::Borrowed(text)
        }
        Ok(Value::String(payload)) => Cow::Owned(payload),
        _ => Cow::Borrowed(text),
    }
}

/// Parse one page: unwrap, classify, normalize for the classified type,
/// and run the matching extractor. The only raised fault is a page with
/// no text content; every extraction problem past that point lands in
/// the result's `errors`.
pub fn parse_page(page: &PageText, config: &ParserConfig) -> Result<PageResult> {
    let text = unwrap_envelope(&page.text);
    if text.trim().is_empty() {
        return Err(ParseError::EmptyPage(page.page_number));
    }

    let document_type = classify(&text);
    let provider = detect_provider(&text);
    let normalized = normalize_for(document_type, &text, Some(provider));

    info!(page = page.page_number, ?document_type, "parsing page");

    let document = match document_type {
        DocumentType::Remittance => {
            ParsedDocument::Remittance(remittance::extract(&normalized.text, config))
        }
        DocumentType::SettlementDetail => {
            ParsedDocument::SettlementDetail(settlement::extract(&normalized.text, config))
        }
        DocumentType::RevenueDistribution => {
            ParsedDocument::RevenueDistribution(revenue::extract(&normalized.text, config))
        }
        DocumentType::PostingTicket => {
            ParsedDocument::PostingTicket(posting::extract(&normalized.text, config))
        }
        DocumentType::CreditDebit => {
            ParsedDocument::CreditDebit(credit_debit::extract(&normalized.text, config))
        }
        DocumentType::AdvanceAdvice => {
            ParsedDocument::AdvanceAdvice(advance::extract(&normalized.text, config))
        }
        DocumentType::Unknown => ParsedDocument::Unknown,
    };

    Ok(PageResult {
        page_number: page.page_number,
        document_type,
        provider: normalized.provider,
        document,
    })
}

/// Trip metadata from a batch's Revenue Distribution pages, keyed by
/// bill of lading. Built after the first extraction pass and consumed by
/// the settlement enrichment pass.
#[derive(Debug, Clone, Default)]
pub struct RevenueIndex {
    by_bill_of_lading: HashMap<String, TripLinkage>,
}

impl RevenueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every revenue line that carries a bill of lading.
    pub fn add(&mut self, result: &RevenueResult) {
        for line in &result.lines {
            let Some(bill_of_lading) = line.bill_of_lading.clone() else {
                continue;
            };
            self.by_bill_of_lading.insert(
                bill_of_lading.clone(),
                TripLinkage {
                    bill_of_lading,
                    trip_number: line.trip_number.clone(),
                    driver_first_name: line.driver_first_name.clone(),
                    driver_last_name: line.driver_last_name.clone(),
                    origin: line.origin.clone(),
                    destination: line.destination.clone(),
                    delivery_date: line.delivery_date,
                },
            );
        }
    }

    pub fn get(&self, bill_of_lading: &str) -> Option<&TripLinkage> {
        self.by_bill_of_lading.get(bill_of_lading)
    }

    pub fn is_empty(&self) -> bool {
        self.by_bill_of_lading.is_empty()
    }
}

/// Attach revenue-distribution metadata to RD settlement lines, joined
/// on bill of lading.
pub fn enrich_settlement(result: &mut SettlementResult, index: &RevenueIndex) {
    for line in &mut result.lines {
        if line.transaction_code != "RD" {
            continue;
        }
        let Some(bill_of_lading) = line.bill_of_lading.as_deref() else {
            continue;
        };
        if let Some(linkage) = index.get(bill_of_lading) {
            debug!(bill_of_lading, "settlement line enriched from revenue index");
            line.distribution = Some(linkage.clone());
        }
    }
}

/// Parse a whole batch with the strict two-pass order: extract every
/// page, index the Revenue Distribution pages, then enrich the
/// Settlement Detail pages from the index. Empty pages are skipped.
pub fn parse_batch(pages: &[PageText], config: &ParserConfig) -> Result<Vec<PageResult>> {
    config.validate()?;

    let mut results = Vec::with_capacity(pages.len());
    for page in pages {
        match parse_page(page, config) {
            Ok(result) => results.push(result),
            Err(ParseError::EmptyPage(number)) => {
                debug!(page = number, "skipping empty page");
            }
            Err(other) => return Err(other),
        }
    }

    let mut index = RevenueIndex::new();
    for result in &results {
        if let ParsedDocument::RevenueDistribution(revenue) = &result.document {
            index.add(revenue);
        }
    }

    if !index.is_empty() {
        for result in &mut results {
            if let ParsedDocument::SettlementDetail(settlement) = &mut result.document {
                enrich_settlement(settlement, &index);
            }
        }
    }

    Ok(results)
}
