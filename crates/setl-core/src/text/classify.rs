//! Document type classification.
//!
//! An ordered decision list over keyword/structural markers. Keyword sets
//! overlap across document types, so rule order is a correctness
//! invariant, not a style choice: each rule is more specific than the
//! ones after it, and the first match wins. Classification is total:
//! every input maps to exactly one type, `Unknown` at worst.

use tracing::debug;

use crate::models::DocumentType;

/// Classify a page of (raw, pre-normalization) OCR text.
pub fn classify(text: &str) -> DocumentType {
    let upper = text.to_uppercase();

    let document_type = decide(&upper);
    debug!(?document_type, "classified page");
    document_type
}

fn decide(upper: &str) -> DocumentType {
    // Remittance carries the most distinctive header.
    if upper.contains("REMITTANCE") || upper.contains("PAYMENT ADVICE") {
        return DocumentType::Remittance;
    }

    // Settlement Detail is checked before Revenue Distribution: its
    // transaction rows legitimately contain "REVENUE DISTR" as a
    // description, which must not trigger the looser rule below.
    if upper.contains("SETTLEMENT DETAIL") || upper.contains("CHECK TOTAL") {
        return DocumentType::SettlementDetail;
    }

    if upper.contains("FOR SERVICE PERFORMED BY")
        || (upper.contains("BILL OF LADING") && upper.contains("SHIPPER"))
    {
        // A pure summary listing has the same structural markers but no
        // per-trip detail worth extracting.
        if upper.contains("SUMMARY OF ITEMS") {
            return DocumentType::Unknown;
        }
        return DocumentType::RevenueDistribution;
    }

    if upper.contains("POSTING TICKET") {
        return DocumentType::PostingTicket;
    }

    // "ADVANCE" alone over-matches; require the co-occurring marker.
    if upper.contains("ADVANCE")
        && (upper.contains("CHARGEBACK") || upper.contains("REQUEST FOR ADVANCE"))
    {
        return DocumentType::AdvanceAdvice;
    }

    // Broadest rule last.
    if upper.contains("CREDIT") || upper.contains("DEBIT") || upper.contains("ADJUSTMENT") {
        return DocumentType::CreditDebit;
    }

    DocumentType::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remittance_markers_win_first() {
        assert_eq!(classify("REMITTANCE ADVICE\nCHECK 590668"), DocumentType::Remittance);
        assert_eq!(classify("PAYMENT ADVICE"), DocumentType::Remittance);
    }

    #[test]
    fn settlement_detail_beats_revenue_distribution() {
        let text = "SETTLEMENT DETAIL\n356985 1854 12/12/25 RD REVENUE DISTR 3,890.63-";
        assert_eq!(classify(text), DocumentType::SettlementDetail);

        // Both marker families present: the earlier rule still wins.
        let both = "SETTLEMENT DETAIL\nFOR SERVICE PERFORMED BY JOHN SMITH";
        assert_eq!(classify(both), DocumentType::SettlementDetail);
    }

    #[test]
    fn check_total_alone_marks_settlement_detail() {
        assert_eq!(classify("<CHECK TOTAL> 100.00"), DocumentType::SettlementDetail);
    }

    #[test]
    fn revenue_distribution_markers() {
        assert_eq!(
            classify("FOR SERVICE PERFORMED BY JOHN SMITH\nTRIP 1854"),
            DocumentType::RevenueDistribution
        );
        assert_eq!(
            classify("BILL OF LADING 356985\nSHIPPER ACME CO"),
            DocumentType::RevenueDistribution
        );
    }

    #[test]
    fn summary_listing_is_demoted_to_unknown() {
        let text = "SUMMARY OF ITEMS\nFOR SERVICE PERFORMED BY JOHN SMITH";
        assert_eq!(classify(text), DocumentType::Unknown);
    }

    #[test]
    fn posting_ticket_before_credit_debit() {
        // A posting ticket mentions DEBIT but must not fall through to
        // the broader rule.
        let text = "POSTING TICKET\nDEBIT 45.00";
        assert_eq!(classify(text), DocumentType::PostingTicket);
    }

    #[test]
    fn advance_requires_co_occurring_marker() {
        assert_eq!(
            classify("REQUEST FOR ADVANCE\nADVANCE AMOUNT 250.00"),
            DocumentType::AdvanceAdvice
        );
        assert_eq!(
            classify("ADVANCE CHARGEBACK NOTICE"),
            DocumentType::AdvanceAdvice
        );
        // Bare ADVANCE with a CREDIT marker falls to credit/debit.
        assert_eq!(classify("ADVANCE CREDIT 50.00"), DocumentType::CreditDebit);
    }

    #[test]
    fn credit_debit_is_the_broadest_rule() {
        assert_eq!(classify("DEBIT MEMO 12.00"), DocumentType::CreditDebit);
        assert_eq!(classify("RATE ADJUSTMENT"), DocumentType::CreditDebit);
    }

    #[test]
    fn classification_is_total() {
        assert_eq!(classify(""), DocumentType::Unknown);
        assert_eq!(classify("unrelated text"), DocumentType::Unknown);
    }
}
