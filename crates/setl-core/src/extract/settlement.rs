//! Settlement Detail extraction: the itemized transaction table.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::rules::amounts::parse_signed_currency;
use super::rules::dates::parse_slash_date;
use super::rules::patterns::{
    AGENCY_CODE, AGENCY_NAME, CHECK_NUMBER_BARE, CHECK_NUMBER_LABELED, CHECK_TOTAL,
    SETTLEMENT_DATE, SETTLEMENT_ROW_FULL, SETTLEMENT_ROW_MINIMAL, SETTLEMENT_ROW_ONE_NUMBER,
    SETTLEMENT_ROW_SHAPE,
};
use super::{first_match, Strategy, StrategyHit};
use crate::models::{line_type_for_code, ParserConfig, SettlementLine, SettlementResult};
use crate::validate::reconcile_check_total;

/// Fields shared by all transaction-row layouts.
#[derive(Debug, Clone)]
pub(crate) struct RowFields {
    bill_of_lading: Option<String>,
    trip_number: Option<String>,
    reference_number: Option<String>,
    date: chrono::NaiveDate,
    code: String,
    description: String,
    amount: Decimal,
}

/// Parse one table row through the layout chain: full (two or three
/// leading numbers) → one-number → minimal (date-first).
pub(crate) fn parse_transaction_row(
    line: &str,
    config: &ParserConfig,
) -> Option<StrategyHit<RowFields>> {
    let full = |line: &str| parse_row_full(line, config);
    let one_number = |line: &str| parse_row_one_number(line, config);
    let minimal = parse_row_minimal;

    first_match(
        &[
            Strategy::new("full", &full),
            Strategy::new("one-number", &one_number),
            Strategy::new("minimal", &minimal),
        ],
        line,
    )
}

fn parse_row_full(line: &str, config: &ParserConfig) -> Option<RowFields> {
    let caps = SETTLEMENT_ROW_FULL.captures(line)?;

    let first = caps[1].to_string();
    let second = caps[2].to_string();
    let third = caps.get(3).map(|m| m.as_str().to_string());
    let date = parse_slash_date(&caps[4])?;
    let code = caps[5].to_string();
    let description = caps[6].trim().to_string();
    let amount = parse_signed_currency(&caps[7])?;

    // Three leading numbers are unambiguous. With two, the digit count
    // decides: a field longer than a trip number can hold is a bill of
    // lading, otherwise the pair is trip + reference.
    let (bill_of_lading, trip_number, reference_number) = match third {
        Some(third) => (Some(first), Some(second), Some(third)),
        None if first.len() > config.trip_number_max_len => (Some(first), Some(second), None),
        None => (None, Some(first), Some(second)),
    };

    Some(RowFields {
        bill_of_lading,
        trip_number,
        reference_number,
        date,
        code,
        description,
        amount,
    })
}

fn parse_row_one_number(line: &str, config: &ParserConfig) -> Option<RowFields> {
    let caps = SETTLEMENT_ROW_ONE_NUMBER.captures(line)?;

    let number = caps[1].to_string();
    let date = parse_slash_date(&caps[2])?;
    let code = caps[3].to_string();
    let description = caps[4].trim().to_string();
    let amount = parse_signed_currency(&caps[5])?;

    let (trip_number, reference_number) = if number.len() <= config.trip_number_max_len {
        (Some(number), None)
    } else {
        (None, Some(number))
    };

    Some(RowFields {
        bill_of_lading: None,
        trip_number,
        reference_number,
        date,
        code,
        description,
        amount,
    })
}

fn parse_row_minimal(line: &str) -> Option<RowFields> {
    let caps = SETTLEMENT_ROW_MINIMAL.captures(line)?;

    Some(RowFields {
        bill_of_lading: None,
        trip_number: None,
        reference_number: None,
        date: parse_slash_date(&caps[1])?,
        code: caps[2].to_string(),
        description: caps[3].trim().to_string(),
        amount: parse_signed_currency(&caps[4])?,
    })
}

/// Extract a Settlement Detail page from preserving-normalized text.
pub fn extract(text: &str, config: &ParserConfig) -> SettlementResult {
    let mut result = SettlementResult::default();

    for line in text.lines() {
        if line.trim().is_empty() || CHECK_TOTAL.is_match(line) {
            continue;
        }

        match parse_transaction_row(line, config) {
            Some(hit) => {
                debug!(strategy = hit.strategy, "parsed settlement row");
                let row = hit.value;
                let line_type = line_type_for_code(&row.code);
                result.lines.push(SettlementLine {
                    bill_of_lading: row.bill_of_lading,
                    trip_number: row.trip_number,
                    reference_number: row.reference_number,
                    date: row.date,
                    transaction_code: row.code,
                    description: row.description,
                    amount: row.amount,
                    line_type,
                    distribution: None,
                    raw_line: line.to_string(),
                });
            }
            // A row shaped like a transaction that no strategy accepted
            // is reported and skipped; it must not abort the rest of
            // the table.
            None if SETTLEMENT_ROW_SHAPE.is_match(line) => {
                result
                    .errors
                    .push(format!("Unparseable transaction row skipped: {}", line.trim()));
            }
            None => {}
        }
    }

    result.check_total = CHECK_TOTAL
        .captures(text)
        .and_then(|caps| parse_signed_currency(&caps[1]));

    result.settlement_date = SETTLEMENT_DATE
        .captures(text)
        .and_then(|caps| parse_slash_date(&caps[1]));

    let labeled = |t: &str| {
        CHECK_NUMBER_LABELED
            .captures(t)
            .map(|caps| caps[1].to_string())
    };
    let bare = |t: &str| CHECK_NUMBER_BARE.captures(t).map(|caps| caps[1].to_string());
    result.check_number = first_match(
        &[Strategy::new("labeled", &labeled), Strategy::new("bare", &bare)],
        text,
    )
    .map(|hit| hit.value);

    result.agency_code = AGENCY_CODE.captures(text).map(|caps| caps[1].to_string());
    result.agency_name = AGENCY_NAME
        .captures(text)
        .map(|caps| caps[1].trim().to_string());

    if let Some(stated) = result.check_total {
        let amounts: Vec<Decimal> = result.lines.iter().map(|l| l.amount).collect();
        if let Some(error) = reconcile_check_total(&amounts, stated, config.check_total_tolerance)
        {
            result.errors.push(error);
        }
    }

    info!(
        lines = result.lines.len(),
        errors = result.errors.len(),
        "extracted settlement detail"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineType;
    use chrono::{Datelike, NaiveDate, Utc};
    use std::str::FromStr;

    fn config() -> ParserConfig {
        ParserConfig::default()
    }

    fn year(two_digit: i32) -> i32 {
        (Utc::now().year() / 100) * 100 + two_digit
    }

    #[test]
    fn two_numbers_within_trip_length_are_trip_and_reference() {
        let result = extract("1855 590493 12/02/25 CM COMDATA 518.00", &config());
        assert_eq!(result.lines.len(), 1);

        let line = &result.lines[0];
        assert_eq!(line.trip_number.as_deref(), Some("1855"));
        assert_eq!(line.reference_number.as_deref(), Some("590493"));
        assert_eq!(line.bill_of_lading, None);
        assert_eq!(line.date, NaiveDate::from_ymd_opt(year(25), 12, 2).unwrap());
        assert_eq!(line.transaction_code, "CM");
        assert_eq!(line.description, "COMDATA");
        assert_eq!(line.amount, Decimal::from_str("518.00").unwrap());
        assert_eq!(line.line_type, LineType::Advance);
    }

    #[test]
    fn long_leading_number_is_a_bill_of_lading() {
        let result = extract("356985 1854 12/12/25 RD REVENUE DISTR 3,890.63-", &config());
        assert_eq!(result.lines.len(), 1);

        let line = &result.lines[0];
        assert_eq!(line.bill_of_lading.as_deref(), Some("356985"));
        assert_eq!(line.trip_number.as_deref(), Some("1854"));
        assert_eq!(line.reference_number, None);
        assert_eq!(line.amount, Decimal::from_str("-3890.63").unwrap());
        assert_eq!(line.line_type, LineType::Revenue);
    }

    #[test]
    fn three_numbers_are_unambiguous() {
        let result = extract(
            "356985 1854 590501 12/12/25 RD REVENUE DISTR 3,890.63-",
            &config(),
        );
        let line = &result.lines[0];
        assert_eq!(line.bill_of_lading.as_deref(), Some("356985"));
        assert_eq!(line.trip_number.as_deref(), Some("1854"));
        assert_eq!(line.reference_number.as_deref(), Some("590501"));
    }

    #[test]
    fn strategy_order_is_stable_per_layout() {
        let config = config();
        let full = parse_transaction_row("1855 590493 12/02/25 CM COMDATA 518.00", &config)
            .unwrap();
        assert_eq!(full.strategy, "full");

        let one = parse_transaction_row("1855 12/02/25 CM COMDATA 518.00", &config).unwrap();
        assert_eq!(one.strategy, "one-number");
        assert_eq!(one.value.trip_number.as_deref(), Some("1855"));

        let minimal = parse_transaction_row("12/02/25 MC SCALE TICKET 12.50-", &config).unwrap();
        assert_eq!(minimal.strategy, "minimal");
    }

    #[test]
    fn lone_long_number_is_a_reference() {
        let hit = parse_transaction_row("590493 12/02/25 CM COMDATA 518.00", &config()).unwrap();
        assert_eq!(hit.value.trip_number, None);
        assert_eq!(hit.value.reference_number.as_deref(), Some("590493"));
    }

    #[test]
    fn raw_line_echo_is_always_kept() {
        let row = "1855 590493 12/02/25 CM COMDATA 518.00";
        let result = extract(row, &config());
        assert_eq!(result.lines[0].raw_line, row);
    }

    #[test]
    fn check_total_mismatch_is_advisory() {
        let text = "\
SETTLEMENT DETAIL
1855 590493 12/02/25 CM COMDATA 45.25
12/02/25 MC SCALE TICKET 45.00
<CHECK TOTAL> 100.00";
        let result = extract(text, &config());

        assert_eq!(result.lines.len(), 2);
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("Check total mismatch")));
    }

    #[test]
    fn matching_check_total_adds_no_error() {
        let text = "\
1855 590493 12/02/25 CM COMDATA 60.00
12/02/25 MC SCALE TICKET 40.00
<CHECK TOTAL> 100.00";
        let result = extract(text, &config());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn malformed_row_is_reported_and_skipped() {
        let text = "\
1855 590493 12/02/25 CM COMDATA 518.00
13/45/25 MC BROKEN ROW 10.00
12/02/25 MC SCALE TICKET 12.50-";
        let result = extract(text, &config());

        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("BROKEN ROW"));
    }

    #[test]
    fn header_fields_are_extracted() {
        let text = "\
SETTLEMENT DETAIL
AGENCY 104 ACME HAULING
SETTLEMENT DATE 12/15/25
CHECK NO. 590668
356985 1854 12/12/25 RD REVENUE DISTR 3,890.63-";
        let result = extract(text, &config());

        assert_eq!(result.agency_code.as_deref(), Some("104"));
        assert_eq!(result.agency_name.as_deref(), Some("ACME HAULING"));
        assert_eq!(result.check_number.as_deref(), Some("590668"));
        assert_eq!(
            result.settlement_date,
            NaiveDate::from_ymd_opt(year(25), 12, 15)
        );
    }

    #[test]
    fn unknown_code_maps_to_other() {
        let result = extract("12/02/25 ZZ MYSTERY 5.00", &config());
        assert_eq!(result.lines[0].line_type, LineType::Other);
    }
}
