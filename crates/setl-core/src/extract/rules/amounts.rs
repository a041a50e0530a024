//! Signed currency parsing for settlement documents.
//!
//! The dominant convention in the source documents is a trailing minus
//! ("3,890.63-") for negative amounts; a leading minus also appears and
//! both must resolve to the same value.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT;

/// Parse a currency token: optional `$`, thousands commas, leading or
/// trailing minus. Returns `None` for anything that does not reduce to a
/// decimal number.
pub fn parse_signed_currency(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let trailing_negative = s.ends_with('-');
    let s = s.strip_suffix('-').unwrap_or(s);
    let leading_negative = s.trim_start().trim_start_matches('$').trim_start().starts_with('-');

    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&cleaned).ok()?;
    if trailing_negative || leading_negative {
        Some(-value)
    } else {
        Some(value)
    }
}

/// Format an amount back into the document convention: thousands commas,
/// two decimals, trailing minus for negatives.
pub fn format_currency(amount: Decimal) -> String {
    let rendered = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let body = format!("{}.{}", grouped, dec_part);
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("{}-", body)
    } else {
        body
    }
}

/// All currency tokens in a text region, in document order.
pub fn all_amounts(text: &str) -> Vec<Decimal> {
    AMOUNT
        .find_iter(text)
        .filter_map(|m| parse_signed_currency(m.as_str()))
        .collect()
}

/// Rightmost currency token on a line. Tables on these documents put the
/// authoritative total in the last column.
pub fn rightmost_amount(line: &str) -> Option<Decimal> {
    AMOUNT
        .find_iter(line)
        .last()
        .and_then(|m| parse_signed_currency(m.as_str()))
}
