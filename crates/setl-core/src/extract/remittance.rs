//! Remittance (payment advice) extraction: check and payee metadata.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::rules::accounts::normalize_account_number;
use super::rules::amounts::{parse_signed_currency, rightmost_amount};
use super::rules::dates::{parse_compact_date, parse_slash_date};
use super::rules::patterns::{
    AGENCY_CODE, AGENCY_NAME, BANK_ACCOUNT, CHECK_AMOUNT_LABELED, CHECK_DATE_COMPACT,
    CHECK_DATE_LABELED, CHECK_NUMBER_BARE, CHECK_NUMBER_LABELED, NON_TEXT_LINE, PAYEE_LABEL,
    PAYEE_ORDER_OF, PAY_EXACTLY,
};
use super::{first_match, Strategy};
use crate::models::{ParserConfig, PaymentMethod, RemittanceResult};

/// Extract a Remittance page from aggressive-normalized text.
pub fn extract(text: &str, config: &ParserConfig) -> RemittanceResult {
    let mut result = RemittanceResult {
        raw_text: text.to_string(),
        ..RemittanceResult::default()
    };

    result.check_number = extract_check_number(text);
    result.check_date = extract_check_date(text);
    result.check_amount = extract_check_amount(text);

    if result.check_date.is_none() {
        result
            .errors
            .push("Missing check date on remittance page".to_string());
    }

    if let Some((name, address)) = extract_payee(text) {
        result.payee_name = Some(name);
        result.payee_address = address;
    }

    result.bank_account = BANK_ACCOUNT
        .captures(text)
        .and_then(|caps| normalize_account_number(&caps[1]));

    result.payment_method = if text.to_uppercase().contains("ELECTRONICALLY TRANSFERRED") {
        Some(PaymentMethod::ElectronicTransfer)
    } else if result.check_number.is_some() {
        Some(PaymentMethod::Check)
    } else {
        None
    };

    result.agency_code = AGENCY_CODE.captures(text).map(|caps| caps[1].to_string());
    result.agency_name = AGENCY_NAME
        .captures(text)
        .map(|caps| caps[1].trim().to_string());

    result.metadata = Some(crate::batch::resolve_from_remittance(&result, config));

    info!(
        check = result.check_number.as_deref().unwrap_or("-"),
        errors = result.errors.len(),
        "extracted remittance"
    );
    result
}

fn extract_check_number(text: &str) -> Option<String> {
    let labeled = |t: &str| {
        CHECK_NUMBER_LABELED
            .captures(t)
            .map(|caps| caps[1].to_string())
    };
    let bare = |t: &str| CHECK_NUMBER_BARE.captures(t).map(|caps| caps[1].to_string());

    first_match(
        &[Strategy::new("labeled", &labeled), Strategy::new("bare", &bare)],
        text,
    )
    .map(|hit| hit.value)
}

fn extract_check_date(text: &str) -> Option<NaiveDate> {
    let labeled_slash = |t: &str| {
        CHECK_DATE_LABELED
            .captures(t)
            .and_then(|caps| parse_slash_date(&caps[1]))
    };
    let labeled_compact = |t: &str| {
        CHECK_DATE_COMPACT
            .captures(t)
            .and_then(|caps| parse_compact_date(&caps[1]))
    };
    let any_slash = parse_any_slash_date;

    let hit = first_match(
        &[
            Strategy::new("labeled-slash", &labeled_slash),
            Strategy::new("labeled-compact", &labeled_compact),
            Strategy::new("any-slash", &any_slash),
        ],
        text,
    )?;
    debug!(strategy = hit.strategy, "check date matched");
    Some(hit.value)
}

fn parse_any_slash_date(text: &str) -> Option<NaiveDate> {
    use super::rules::patterns::SLASH_DATE;
    SLASH_DATE
        .find_iter(text)
        .find_map(|m| parse_slash_date(m.as_str()))
}

fn extract_check_amount(text: &str) -> Option<Decimal> {
    let labeled = |t: &str| {
        CHECK_AMOUNT_LABELED
            .captures(t)
            .and_then(|caps| parse_signed_currency(&caps[1]))
    };
    let pay_exactly = |t: &str| {
        PAY_EXACTLY
            .captures(t)
            .and_then(|caps| parse_signed_currency(&caps[1]))
    };
    // The amount shares the check-number line on some layouts; the last
    // column is the amount.
    let check_line = |t: &str| {
        t.lines()
            .find(|l| CHECK_NUMBER_LABELED.is_match(l) || CHECK_NUMBER_BARE.is_match(l))
            .and_then(rightmost_amount)
    };

    let hit = first_match(
        &[
            Strategy::new("labeled-amount", &labeled),
            Strategy::new("pay-exactly", &pay_exactly),
            Strategy::new("check-line", &check_line),
        ],
        text,
    )?;
    debug!(strategy = hit.strategy, "check amount matched");
    Some(hit.value)
}

/// Payee name and the address lines that follow it.
fn extract_payee(text: &str) -> Option<(String, Option<String>)> {
    let lines: Vec<&str> = text.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        let name = if let Some(caps) = PAYEE_ORDER_OF.captures(line) {
            match caps.get(1).map(|m| m.as_str().trim()) {
                Some(rest) if !rest.is_empty() => Some(rest.to_string()),
                // Label alone; the payee is on the next line.
                _ => lines
                    .get(i + 1)
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty()),
            }
        } else {
            PAYEE_LABEL
                .captures(line)
                .map(|caps| caps[1].trim().to_string())
        };

        if let Some(name) = name {
            let address = collect_address(&lines, i + 1, &name);
            return Some((name, address));
        }
    }

    None
}

/// Address block: the non-empty lines after the payee name, up to the
/// next labeled field or blank gap.
fn collect_address(lines: &[&str], start: usize, payee_name: &str) -> Option<String> {
    let mut parts = Vec::new();

    for line in lines.iter().skip(start).take(3) {
        let trimmed = line.trim();
        if trimmed.is_empty()
            || trimmed == payee_name
            || NON_TEXT_LINE.is_match(trimmed)
            || BANK_ACCOUNT.is_match(trimmed)
            || CHECK_NUMBER_LABELED.is_match(trimmed)
            || CHECK_DATE_LABELED.is_match(trimmed)
            || CHECK_AMOUNT_LABELED.is_match(trimmed)
        {
            if trimmed.is_empty() && !parts.is_empty() {
                break;
            }
            continue;
        }
        parts.push(trimmed.to_string());
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Utc};
    use std::str::FromStr;

    fn config() -> ParserConfig {
        ParserConfig::default()
    }

    fn year(two_digit: i32) -> i32 {
        (Utc::now().year() / 100) * 100 + two_digit
    }

    const PAGE: &str = "\
REMITTANCE ADVICE
AGENCY 104 ACME HAULING
CHECK 590668
DATE 12/18/25
AMOUNT $3,330.53
PAY TO THE ORDER OF ACME HAULING INC
1200 FREIGHT LANE
MEMPHIS, TN 38103
ACCOUNT NO. 0004512890";

    #[test]
    fn extracts_check_header_fields() {
        let result = extract(PAGE, &config());

        assert_eq!(result.check_number.as_deref(), Some("590668"));
        assert_eq!(
            result.check_date,
            NaiveDate::from_ymd_opt(year(25), 12, 18)
        );
        assert_eq!(
            result.check_amount,
            Some(Decimal::from_str("3330.53").unwrap())
        );
        assert!(result.errors.is_empty());
    }

    #[test]
    fn payment_method_follows_transfer_marker() {
        let result = extract(PAGE, &config());
        assert_eq!(result.payment_method, Some(PaymentMethod::Check));

        let electronic = format!("{}\nFUNDS ELECTRONICALLY TRANSFERRED", PAGE);
        let result = extract(&electronic, &config());
        assert_eq!(result.payment_method, Some(PaymentMethod::ElectronicTransfer));
    }

    #[test]
    fn payment_method_undefined_without_check_or_marker() {
        let result = extract("REMITTANCE ADVICE\nNO USABLE FIELDS", &config());
        assert_eq!(result.payment_method, None);
    }

    #[test]
    fn payee_name_and_address_are_collected() {
        let result = extract(PAGE, &config());
        assert_eq!(result.payee_name.as_deref(), Some("ACME HAULING INC"));
        assert_eq!(
            result.payee_address.as_deref(),
            Some("1200 FREIGHT LANE, MEMPHIS, TN 38103")
        );
    }

    #[test]
    fn payee_on_line_after_label() {
        let text = "REMITTANCE\nPAY TO THE ORDER OF\nACME HAULING INC\nDATE 12/18/25";
        let result = extract(text, &config());
        assert_eq!(result.payee_name.as_deref(), Some("ACME HAULING INC"));
    }

    #[test]
    fn bank_account_is_zero_stripped() {
        let result = extract(PAGE, &config());
        assert_eq!(result.bank_account.as_deref(), Some("4512890"));
    }

    #[test]
    fn compact_check_date_fallback() {
        let text = "REMITTANCE\nCHECK NO. 590668\nDATE 121825";
        let result = extract(text, &config());
        assert_eq!(
            result.check_date,
            NaiveDate::from_ymd_opt(year(25), 12, 18)
        );
    }

    #[test]
    fn missing_check_date_is_an_error() {
        let result = extract("REMITTANCE ADVICE\nCHECK 590668", &config());
        assert!(result
            .errors
            .iter()
            .any(|e| e.contains("check date")));
    }

    #[test]
    fn agency_header_is_extracted() {
        let result = extract(PAGE, &config());
        assert_eq!(result.agency_code.as_deref(), Some("104"));
        assert_eq!(result.agency_name.as_deref(), Some("ACME HAULING"));
    }

    #[test]
    fn metadata_is_derived_from_the_check() {
        let result = extract(PAGE, &config());
        let metadata = result.metadata.unwrap();
        assert_eq!(metadata.payment_reference, "590668");
        assert_eq!(metadata.check_date, result.check_date);
        assert!(metadata.week_start_date.is_some());
    }
}
