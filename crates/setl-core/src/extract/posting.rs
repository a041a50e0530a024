//! Posting Ticket extraction: a standalone miscellaneous charge or
//! credit posted against the agency.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::rules::amounts::{parse_signed_currency, rightmost_amount};
use super::rules::dates::parse_slash_date;
use super::rules::patterns::{AMOUNT_BARE, GL_ACCOUNT, LABELED_DATE, POSTING_KIND_AMOUNT};
use super::{first_match, Strategy};
use crate::models::{EntryKind, ParserConfig, PostingLine, PostingResult};

lazy_static! {
    static ref DESCRIPTION_LABEL: Regex =
        Regex::new(r"(?i)\bDESCRIPTION\s*[:.]?[ \t]*(\S[^\n]*)").unwrap();
}

/// Extract a Posting Ticket page from aggressive-normalized text.
pub fn extract(text: &str, _config: &ParserConfig) -> PostingResult {
    let mut result = PostingResult::default();
    let upper = text.to_uppercase();

    let labeled_kind = |t: &str| {
        t.lines().find_map(|line| {
            let caps = POSTING_KIND_AMOUNT.captures(line)?;
            let kind = if caps[1].eq_ignore_ascii_case("CREDIT") {
                EntryKind::Credit
            } else {
                EntryKind::Debit
            };
            parse_signed_currency(&caps[2]).map(|amount| (amount, kind))
        })
    };
    let bare_amount = |t: &str| {
        AMOUNT_BARE
            .captures(t)
            .and_then(|caps| parse_signed_currency(&caps[1]))
            .map(|amount| (amount, kind_from_keywords(&upper)))
    };
    let rightmost = |t: &str| {
        rightmost_amount(t).map(|amount| (amount, kind_from_keywords(&upper)))
    };

    let (amount, kind) = match first_match(
        &[
            Strategy::new("kind-labeled", &labeled_kind),
            Strategy::new("amount-bare", &bare_amount),
            Strategy::new("rightmost", &rightmost),
        ],
        text,
    ) {
        Some(hit) => {
            debug!(strategy = hit.strategy, "posting amount matched");
            hit.value
        }
        None => {
            result
                .errors
                .push("Missing posting amount; defaulted to 0".to_string());
            (Decimal::ZERO, kind_from_keywords(&upper))
        }
    };

    let description = DESCRIPTION_LABEL
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| "POSTING TICKET".to_string());

    result.lines.push(PostingLine {
        date: LABELED_DATE
            .captures(text)
            .and_then(|caps| parse_slash_date(&caps[1])),
        gl_account: GL_ACCOUNT.captures(text).map(|caps| caps[1].to_string()),
        description,
        amount,
        kind,
        raw_text: text.to_string(),
    });

    info!(errors = result.errors.len(), "extracted posting ticket");
    result
}

fn kind_from_keywords(upper: &str) -> EntryKind {
    if upper.contains("CREDIT") && !upper.contains("DEBIT") {
        EntryKind::Credit
    } else {
        EntryKind::Debit
    }
}
