//! Revenue Distribution extraction: per-trip route, driver, and
//! service-item breakdown.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{debug, info};

use super::rules::amounts::parse_signed_currency;
use super::rules::dates::{
    date_from_parts, parse_slash_date, parse_spaced_date, resolve_one_digit_year,
};
use super::rules::names::split_person_name;
use super::rules::patterns::{
    BILL_OF_LADING, DELIVERY_DOT, DELIVERY_HEADER, DELIVERY_MERGED, DELIVERY_SPACED, NET_BALANCE,
    NVL_ENTRY_DATE, ROUTE_PAIR, SERVICE_ITEM_ROW, SERVICE_PERFORMED_BY, TRIP_BARE, TRIP_LABELED,
};
use super::{first_match, Strategy};
use crate::models::{ParserConfig, RevenueLine, RevenueResult, ServiceItem};

/// Extract a Revenue Distribution page from preserving-normalized text.
///
/// Exactly one line is emitted per page, even when every field missed;
/// trip number and net balance are load-bearing for the ledger, so their
/// absence is recorded in `errors`.
pub fn extract(text: &str, _config: &ParserConfig) -> RevenueResult {
    let mut result = RevenueResult::default();
    let mut line = RevenueLine {
        raw_text: text.to_string(),
        ..RevenueLine::default()
    };

    let labeled = |t: &str| TRIP_LABELED.captures(t).map(|c| c[1].to_string());
    let bare = |t: &str| TRIP_BARE.captures(t).map(|c| c[1].to_string());
    line.trip_number = first_match(
        &[Strategy::new("labeled", &labeled), Strategy::new("bare", &bare)],
        text,
    )
    .map(|hit| hit.value);
    if line.trip_number.is_none() {
        result
            .errors
            .push("Missing trip number on revenue distribution page".to_string());
    }

    line.bill_of_lading = BILL_OF_LADING.captures(text).map(|c| c[1].to_string());

    if let Some(driver) = extract_driver(text) {
        let (first, last) = split_person_name(&driver);
        line.driver_first_name = first;
        line.driver_last_name = last;
    }

    if let Some(caps) = ROUTE_PAIR.captures(text) {
        line.origin = Some(format!("{}, {}", caps[1].trim(), &caps[2]));
        line.destination = Some(format!("{}, {}", caps[3].trim(), &caps[4]));
    }

    line.delivery_date = extract_delivery_date(text);

    line.service_items = extract_service_items(text);

    match NET_BALANCE
        .captures(text)
        .and_then(|c| parse_signed_currency(&c[1]))
    {
        Some(balance) => line.net_balance = balance,
        None => {
            line.net_balance = Decimal::ZERO;
            result
                .errors
                .push("Missing net balance on revenue distribution page".to_string());
        }
    }

    info!(
        trip = line.trip_number.as_deref().unwrap_or("-"),
        items = line.service_items.len(),
        "extracted revenue distribution"
    );
    result.lines.push(line);
    result
}

fn extract_driver(text: &str) -> Option<String> {
    let caps = SERVICE_PERFORMED_BY.captures(text)?;
    let same_line = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if !same_line.is_empty() {
        return Some(same_line.to_string());
    }

    // Label alone on its line; the name follows on the next one.
    let label_end = caps.get(0)?.end();
    text[label_end..]
        .lines()
        .map(str::trim)
        .find(|l| {
            !l.is_empty() && !TRIP_LABELED.is_match(l) && !BILL_OF_LADING.is_match(l)
        })
        .map(str::to_string)
}

/// Delivery date layout chain: dot-separated month.day anchored to a
/// P-code → spaced month/day/one-digit-year on a P-code → merged
/// day+year OCR artifact → explicit DELIVERY DATE header. Out-of-range
/// components make the field come back empty rather than wrong.
fn extract_delivery_date(text: &str) -> Option<NaiveDate> {
    let fallback_year = entry_year(text);

    let dot = |t: &str| {
        let caps = DELIVERY_DOT.captures(t)?;
        date_from_parts(fallback_year, caps[1].parse().ok()?, caps[2].parse().ok()?)
    };
    let spaced = |t: &str| {
        let caps = DELIVERY_SPACED.captures(t)?;
        parse_spaced_date(caps.get(0)?.as_str())
    };
    let merged = |t: &str| {
        let caps = DELIVERY_MERGED.captures(t)?;
        let year = resolve_one_digit_year(caps[3].parse().ok()?);
        date_from_parts(year, caps[1].parse().ok()?, caps[2].parse().ok()?)
    };
    let header = |t: &str| {
        let caps = DELIVERY_HEADER.captures(t)?;
        parse_slash_date(&caps[1])
    };

    let hit = first_match(
        &[
            Strategy::new("dot-p-code", &dot),
            Strategy::new("spaced-p-code", &spaced),
            Strategy::new("merged-day-year", &merged),
            Strategy::new("delivery-header", &header),
        ],
        text,
    )?;
    debug!(strategy = hit.strategy, "delivery date matched");
    Some(hit.value)
}

/// Year used for date renderings that omit one: the page's entry date
/// when stated, otherwise the current year.
fn entry_year(text: &str) -> i32 {
    NVL_ENTRY_DATE
        .captures(text)
        .and_then(|c| parse_slash_date(&c[1]))
        .map(|d| d.year())
        .unwrap_or_else(|| Utc::now().year())
}

fn extract_service_items(text: &str) -> Vec<ServiceItem> {
    let mut items = Vec::new();

    for line in text.lines() {
        if NET_BALANCE.is_match(line) || line.to_uppercase().contains("TOTAL") {
            continue;
        }
        let Some(caps) = SERVICE_ITEM_ROW.captures(line) else {
            continue;
        };
        let Some(amount) = parse_signed_currency(&caps[2]) else {
            continue;
        };

        items.push(ServiceItem {
            description: caps[1].trim().to_string(),
            amount,
            percentage: caps.get(3).and_then(|m| Decimal::from_str(m.as_str()).ok()),
            earnings: caps.get(4).and_then(|m| parse_signed_currency(m.as_str())),
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ParserConfig {
        ParserConfig::default()
    }

    const PAGE: &str = "\
REVENUE DISTRIBUTION                    NVL ENTRY 12/14/25
FOR SERVICE PERFORMED BY JOHN A SMITH
TRIP NUMBER 1854        BILL OF LADING 356985
CHICAGO, IL TO MEMPHIS, TN
DELIVERED 12.02 P4512
LINEHAUL 3,890.63 75.00% 2,917.97
FUEL SURCHARGE 250.00
NET BALANCE DUE 3,167.97";

    #[test]
    fn extracts_full_trip_breakdown() {
        let result = extract(PAGE, &config());
        assert!(result.errors.is_empty());
        assert_eq!(result.lines.len(), 1);

        let line = &result.lines[0];
        assert_eq!(line.trip_number.as_deref(), Some("1854"));
        assert_eq!(line.bill_of_lading.as_deref(), Some("356985"));
        assert_eq!(line.driver_first_name.as_deref(), Some("JOHN"));
        assert_eq!(line.driver_last_name.as_deref(), Some("SMITH"));
        assert_eq!(line.origin.as_deref(), Some("CHICAGO, IL"));
        assert_eq!(line.destination.as_deref(), Some("MEMPHIS, TN"));
        assert_eq!(line.delivery_date, NaiveDate::from_ymd_opt(2025, 12, 2));
        assert_eq!(line.net_balance, Decimal::from_str("3167.97").unwrap());
        assert_eq!(line.raw_text, PAGE);
    }

    #[test]
    fn service_items_carry_percentage_splits() {
        let result = extract(PAGE, &config());
        let items = &result.lines[0].service_items;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].description, "LINEHAUL");
        assert_eq!(items[0].amount, Decimal::from_str("3890.63").unwrap());
        assert_eq!(items[0].percentage, Some(Decimal::from_str("75.00").unwrap()));
        assert_eq!(items[0].earnings, Some(Decimal::from_str("2917.97").unwrap()));
        assert_eq!(items[1].description, "FUEL SURCHARGE");
        assert_eq!(items[1].percentage, None);
    }

    #[test]
    fn missing_trip_and_net_balance_yield_two_errors() {
        let text = "FOR SERVICE PERFORMED BY JOHN SMITH\nLINEHAUL 100.00";
        let result = extract(text, &config());

        assert_eq!(result.lines.len(), 1);
        let line = &result.lines[0];
        assert_eq!(line.trip_number, None);
        assert_eq!(line.net_balance, Decimal::ZERO);

        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().any(|e| e.contains("trip number")));
        assert!(result.errors.iter().any(|e| e.contains("net balance")));
    }

    #[test]
    fn driver_name_on_following_line() {
        let text = "FOR SERVICE PERFORMED BY\nJANE DOE\nTRIP 1900\nNET BALANCE 50.00";
        let result = extract(text, &config());
        let line = &result.lines[0];
        assert_eq!(line.driver_first_name.as_deref(), Some("JANE"));
        assert_eq!(line.driver_last_name.as_deref(), Some("DOE"));
    }

    #[test]
    fn delivery_date_chain_order() {
        let config = config();

        // Spaced month/day/year anchored to the P-code.
        let spaced = "TRIP 1854\n12 02 5 P4512\nNET BALANCE 1.00";
        let result = extract(spaced, &config);
        let decade = (Utc::now().year() / 10) * 10;
        assert_eq!(
            result.lines[0].delivery_date,
            NaiveDate::from_ymd_opt(decade + 5, 12, 2)
        );

        // Merged day+year artifact: "025" is day 02 plus year digit 5.
        let merged = "TRIP 1854\n12 025 P4512\nNET BALANCE 1.00";
        let result = extract(merged, &config);
        assert_eq!(
            result.lines[0].delivery_date,
            NaiveDate::from_ymd_opt(decade + 5, 12, 2)
        );

        // Header fallback.
        let header = "TRIP 1854\nDELIVERY DATE 12/02/25\nNET BALANCE 1.00";
        let result = extract(header, &config);
        let century = (Utc::now().year() / 100) * 100;
        assert_eq!(
            result.lines[0].delivery_date,
            NaiveDate::from_ymd_opt(century + 25, 12, 2)
        );
    }

    #[test]
    fn out_of_range_delivery_date_is_dropped() {
        let text = "TRIP 1854\nDELIVERED 13.40 P4512\nNET BALANCE 1.00";
        let result = extract(text, &config());
        assert_eq!(result.lines[0].delivery_date, None);
    }

    #[test]
    fn stricter_date_strategy_wins_when_both_present() {
        // Dot form and header form both present: the dot form is earlier
        // in the chain and must win.
        let text = "\
NVL ENTRY 12/14/25
TRIP 1854
DELIVERED 12.02 P4512
DELIVERY DATE 11/30/25
NET BALANCE 1.00";
        let result = extract(text, &config());
        assert_eq!(result.lines[0].delivery_date, NaiveDate::from_ymd_opt(2025, 12, 2));
    }
}
