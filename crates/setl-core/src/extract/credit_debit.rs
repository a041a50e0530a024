//! Credit/Debit Notification extraction.
//!
//! Descriptions and amounts come from two independent scans: a bounded
//! description window near the top of the page, and the DEBITS/CREDITS
//! table region below. The i-th description is paired with the i-th
//! amount. That positional pairing is a known-lossy approximation: when
//! OCR drops a row or the counts diverge there is no structural guarantee
//! the pair belongs to the same table row, and reliably fixing it would
//! need the original document's column alignment. The behavior is kept
//! as-is for compatibility; divergence is reported, not repaired.

use tracing::{info, warn};

use super::rules::amounts::all_amounts;
use super::rules::patterns::{AMOUNT, NON_TEXT_LINE};
use crate::models::{ChargeLine, CreditDebitResult, EntryKind, ParserConfig};

/// Whole-line tokens that can never be a charge description: section
/// headers, the document title, and connective words.
const EXCLUDED_TOKENS: &[&str] = &[
    "DATE",
    "DESCRIPTION",
    "DEBITS",
    "CREDITS",
    "CREDIT",
    "DEBIT",
    "CREDIT/DEBIT",
    "NOTIFICATION",
    "ADJUSTMENT",
    "MEMO",
    "TOTAL",
    "AMOUNT",
    "AGENCY",
    "TO",
    "FOR",
    "OF",
    "FROM",
    "AND",
    "THE",
];

/// Extract a Credit/Debit Notification page from aggressive-normalized
/// text.
pub fn extract(text: &str, config: &ParserConfig) -> CreditDebitResult {
    let mut result = CreditDebitResult::default();
    let lines: Vec<&str> = text.lines().collect();

    let descriptions = collect_descriptions(&lines, config.description_window_lines);
    let amounts = collect_amounts(&lines);

    let paired = descriptions.len().min(amounts.len());
    if descriptions.len() != amounts.len() {
        warn!(
            descriptions = descriptions.len(),
            amounts = amounts.len(),
            "description/amount counts diverge; pairing positionally and truncating"
        );
        result.errors.push(format!(
            "Description/amount count mismatch ({} descriptions, {} amounts); extra entries dropped",
            descriptions.len(),
            amounts.len()
        ));
    }

    for i in 0..paired {
        let (amount, kind, raw) = &amounts[i];
        result.lines.push(ChargeLine {
            description: descriptions[i].clone(),
            amount: *amount,
            kind: *kind,
            raw_text: raw.clone(),
        });
    }

    info!(
        lines = result.lines.len(),
        errors = result.errors.len(),
        "extracted credit/debit notification"
    );
    result
}

fn is_excluded(candidate: &str) -> bool {
    if candidate.is_empty() || NON_TEXT_LINE.is_match(candidate) {
        return true;
    }
    candidate.split_whitespace().all(|word| {
        EXCLUDED_TOKENS.contains(&word.to_uppercase().as_str())
            || !word.chars().any(|c| c.is_alphabetic())
    })
}

/// Bounded description window: lines above the amounts table, minus the
/// exclusion tokens. On layouts without a table region the description
/// shares its line with the amount; the text before the amount is the
/// candidate.
fn collect_descriptions(lines: &[&str], window: usize) -> Vec<String> {
    lines
        .iter()
        .take_while(|line| !is_region_header(line))
        .take(window)
        .filter_map(|line| {
            let trimmed = line.trim();
            let candidate = match AMOUNT.find(trimmed) {
                Some(m) => trimmed[..m.start()].trim(),
                None => trimmed,
            };
            (!is_excluded(candidate)).then(|| candidate.to_string())
        })
        .collect()
}

fn is_region_header(line: &str) -> bool {
    let upper = line.trim().to_uppercase();
    upper == "DEBITS" || upper == "CREDITS" || upper.starts_with("DEBITS ") || upper.starts_with("CREDITS ")
}

/// Amounts from the DEBITS/CREDITS table region, tagged with the entry
/// kind of the region they appear under. Without region headers every
/// amount on the page is taken, with the kind inferred from the page
/// keywords.
fn collect_amounts(lines: &[&str]) -> Vec<(rust_decimal::Decimal, EntryKind, String)> {
    let mut amounts = Vec::new();
    let mut region: Option<EntryKind> = None;
    let has_headers = lines.iter().any(|l| is_region_header(l));

    let page_kind = if lines
        .iter()
        .any(|l| l.to_uppercase().contains("CREDIT"))
        && !lines.iter().any(|l| l.to_uppercase().contains("DEBIT"))
    {
        EntryKind::Credit
    } else {
        EntryKind::Debit
    };

    for line in lines {
        let upper = line.trim().to_uppercase();
        if upper.starts_with("DEBITS") {
            region = Some(EntryKind::Debit);
            continue;
        }
        if upper.starts_with("CREDITS") {
            region = Some(EntryKind::Credit);
            continue;
        }
        // Summary rows restate the region's amounts and would be
        // double-counted.
        if upper.starts_with("TOTAL") {
            continue;
        }

        let kind = match (has_headers, region) {
            (true, Some(kind)) => kind,
            // Amounts above the first region header belong to the
            // description window, not the table.
            (true, None) => continue,
            (false, _) => page_kind,
        };

        for amount in all_amounts(line) {
            amounts.push((amount, kind, line.trim().to_string()));
        }
    }

    amounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config() -> ParserConfig {
        ParserConfig::default()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const PAGE: &str = "\
CREDIT/DEBIT NOTIFICATION
AGENCY 104
FUEL SURCHARGE CORRECTION
SCALE TICKET REBILL
DEBITS
45.00
12.50
CREDITS
30.00";

    #[test]
    fn pairs_descriptions_with_amounts_positionally() {
        let result = extract(PAGE, &config());

        // Two descriptions, three amounts: truncated to two pairs.
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].description, "FUEL SURCHARGE CORRECTION");
        assert_eq!(result.lines[0].amount, dec("45.00"));
        assert_eq!(result.lines[0].kind, EntryKind::Debit);
        assert_eq!(result.lines[1].description, "SCALE TICKET REBILL");
        assert_eq!(result.lines[1].amount, dec("12.50"));

        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("count mismatch")));
    }

    #[test]
    fn credits_region_tags_credit_kind() {
        let text = "\
DEBIT NOTIFICATION
LATE FEE
OVERPAYMENT REFUND
DEBITS
45.00
CREDITS
30.00";
        let result = extract(text, &config());

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0].kind, EntryKind::Debit);
        assert_eq!(result.lines[1].kind, EntryKind::Credit);
        assert_eq!(result.lines[1].amount, dec("30.00"));
    }

    #[test]
    fn headers_and_prepositions_are_not_descriptions() {
        let text = "\
CREDIT/DEBIT NOTIFICATION
DATE
TO
FUEL REBATE
DEBITS
20.00";
        let result = extract(text, &config());
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].description, "FUEL REBATE");
    }

    #[test]
    fn numeric_only_lines_are_not_descriptions() {
        let text = "\
DEBIT NOTIFICATION
590668
LATE FEE
DEBITS
15.00";
        let result = extract(text, &config());
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].description, "LATE FEE");
    }

    #[test]
    fn no_region_headers_takes_all_amounts() {
        let text = "CREDIT ADJUSTMENT\nRATE CORRECTION 30.00";
        let result = extract(text, &config());
        assert_eq!(result.lines.len(), 1);
        assert_eq!(result.lines[0].kind, EntryKind::Credit);
        assert_eq!(result.lines[0].amount, dec("30.00"));
    }

    #[test]
    fn matched_counts_produce_no_error() {
        let text = "\
DEBIT NOTIFICATION
LATE FEE
DEBITS
45.00";
        let result = extract(text, &config());
        assert_eq!(result.lines.len(), 1);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn empty_page_region_yields_no_lines() {
        let result = extract("CREDIT/DEBIT NOTIFICATION", &config());
        assert!(result.lines.is_empty());
        assert!(result.errors.is_empty());
    }
}
