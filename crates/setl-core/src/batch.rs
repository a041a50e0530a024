//! Batch metadata: settlement-week bounds and the canonical payment
//! reference for a parsed batch.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::extract::rules::names::name_similarity;
use crate::models::{BatchMetadata, ParserConfig, RemittanceResult, SettlementResult};

/// Settlement-week bounds for a check date. The week ends a fixed number
/// of days before the check date and has a fixed length. `NaiveDate`
/// arithmetic is pure calendar math, so crossing a daylight-saving
/// boundary cannot shift the result.
pub fn week_bounds(check_date: NaiveDate, config: &ParserConfig) -> (NaiveDate, NaiveDate) {
    let end = check_date - Duration::days(config.week_end_offset_days);
    let start = end - Duration::days(config.week_length_days - 1);
    (start, end)
}

/// Derive batch metadata, preferring Remittance header fields and
/// falling back to the Settlement Detail header for whatever is missing.
/// Returns `None` only when neither document is available.
pub fn resolve(
    remittance: Option<&RemittanceResult>,
    settlement: Option<&SettlementResult>,
    config: &ParserConfig,
) -> Option<BatchMetadata> {
    if remittance.is_none() && settlement.is_none() {
        return None;
    }

    let check_number = remittance
        .and_then(|r| r.check_number.clone())
        .or_else(|| settlement.and_then(|s| s.check_number.clone()));

    let check_date = remittance
        .and_then(|r| r.check_date)
        .or_else(|| settlement.and_then(|s| s.settlement_date));

    let agency_code = remittance
        .and_then(|r| r.agency_code.clone())
        .or_else(|| settlement.and_then(|s| s.agency_code.clone()));

    let agency_name = canonical_agency_name(
        remittance.and_then(|r| r.agency_name.as_deref()),
        remittance.and_then(|r| r.payee_name.as_deref()),
        settlement.and_then(|s| s.agency_name.as_deref()),
        config.name_match_threshold,
    );

    let payment_reference = check_number
        .unwrap_or_else(|| synthetic_reference(agency_code.as_deref(), check_date, config));

    let (week_start_date, week_end_date) = match check_date {
        Some(date) => {
            let (start, end) = week_bounds(date, config);
            (Some(start), Some(end))
        }
        None => (None, None),
    };

    Some(BatchMetadata {
        payment_reference,
        agency_code,
        agency_name,
        check_date,
        week_start_date,
        week_end_date,
    })
}

/// Convenience for the remittance extractor, which derives metadata from
/// its own header alone.
pub fn resolve_from_remittance(
    remittance: &RemittanceResult,
    config: &ParserConfig,
) -> BatchMetadata {
    resolve(Some(remittance), None, config)
        .expect("remittance metadata resolution always yields a value")
}

/// Pick the agency name across documents. The remittance payee line is
/// the check's authoritative spelling; a header agency name that fuzzily
/// matches it confirms the entity, a dissimilar one is OCR noise or a
/// different field and loses to the payee.
fn canonical_agency_name(
    remittance_agency: Option<&str>,
    payee: Option<&str>,
    settlement_agency: Option<&str>,
    threshold: f32,
) -> Option<String> {
    let header = remittance_agency.or(settlement_agency);

    match (header, payee) {
        (Some(header), Some(payee)) => {
            let similarity = name_similarity(header, payee);
            debug!(header, payee, similarity, "agency name cross-check");
            if similarity >= threshold {
                Some(header.to_string())
            } else {
                Some(payee.to_string())
            }
        }
        (Some(header), None) => Some(header.to_string()),
        (None, Some(payee)) => Some(payee.to_string()),
        (None, None) => None,
    }
}

/// Reference used when no check number was printed. Built from fixed
/// parts so it is never empty and is stable for the same batch.
fn synthetic_reference(
    agency_code: Option<&str>,
    check_date: Option<NaiveDate>,
    config: &ParserConfig,
) -> String {
    let agency = agency_code.unwrap_or("NOAGY");
    let date = check_date
        .map(|d| d.format("%Y%m%d").to_string())
        .unwrap_or_else(|| "NODATE".to_string());
    format!("{}-{}-{}", config.payment_ref_prefix, agency, date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ParserConfig {
        ParserConfig::default()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn remittance_with(
        check_number: Option<&str>,
        check_date: Option<NaiveDate>,
    ) -> RemittanceResult {
        RemittanceResult {
            check_number: check_number.map(str::to_string),
            check_date,
            agency_code: Some("104".to_string()),
            ..RemittanceResult::default()
        }
    }

    #[test]
    fn week_ends_offset_days_before_check_date() {
        let (start, end) = week_bounds(date(2025, 12, 18), &config());
        assert_eq!(end, date(2025, 12, 15));
        assert_eq!(start, date(2025, 12, 9));
    }

    #[test]
    fn week_bounds_cross_month_and_year() {
        let (start, end) = week_bounds(date(2026, 1, 2), &config());
        assert_eq!(end, date(2025, 12, 30));
        assert_eq!(start, date(2025, 12, 24));
    }

    #[test]
    fn check_number_becomes_the_payment_reference() {
        let remittance = remittance_with(Some("590668"), Some(date(2025, 12, 18)));
        let metadata = resolve(Some(&remittance), None, &config()).unwrap();
        assert_eq!(metadata.payment_reference, "590668");
        assert_eq!(metadata.week_start_date, Some(date(2025, 12, 9)));
        assert_eq!(metadata.week_end_date, Some(date(2025, 12, 15)));
    }

    #[test]
    fn missing_check_number_synthesizes_a_reference() {
        let remittance = remittance_with(None, Some(date(2025, 12, 18)));
        let metadata = resolve(Some(&remittance), None, &config()).unwrap();
        assert_eq!(metadata.payment_reference, "SET-104-20251218");
    }

    #[test]
    fn synthetic_reference_is_never_empty() {
        let remittance = RemittanceResult::default();
        let metadata = resolve(Some(&remittance), None, &config()).unwrap();
        assert_eq!(metadata.payment_reference, "SET-NOAGY-NODATE");
    }

    #[test]
    fn settlement_header_is_the_fallback() {
        let settlement = SettlementResult {
            check_number: Some("590700".to_string()),
            settlement_date: Some(date(2025, 12, 15)),
            agency_code: Some("104".to_string()),
            agency_name: Some("ACME HAULING".to_string()),
            ..SettlementResult::default()
        };
        let metadata = resolve(None, Some(&settlement), &config()).unwrap();
        assert_eq!(metadata.payment_reference, "590700");
        assert_eq!(metadata.agency_name.as_deref(), Some("ACME HAULING"));
        assert_eq!(metadata.check_date, Some(date(2025, 12, 15)));
    }

    #[test]
    fn similar_payee_confirms_the_header_agency_name() {
        let remittance = RemittanceResult {
            agency_name: Some("ACME HAUL1NG".to_string()),
            payee_name: Some("ACME HAULING".to_string()),
            ..RemittanceResult::default()
        };
        let metadata = resolve(Some(&remittance), None, &config()).unwrap();
        assert_eq!(metadata.agency_name.as_deref(), Some("ACME HAUL1NG"));
    }

    #[test]
    fn dissimilar_header_loses_to_the_payee() {
        let remittance = RemittanceResult {
            agency_name: Some("X7 9Q".to_string()),
            payee_name: Some("ACME HAULING INC".to_string()),
            ..RemittanceResult::default()
        };
        let metadata = resolve(Some(&remittance), None, &config()).unwrap();
        assert_eq!(metadata.agency_name.as_deref(), Some("ACME HAULING INC"));
    }

    #[test]
    fn no_documents_no_metadata() {
        assert!(resolve(None, None, &config()).is_none());
    }
}
