//! Advance Advice extraction: one cash-advance amount per page.

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::rules::amounts::{parse_signed_currency, rightmost_amount};
use super::rules::dates::{parse_compact_date, parse_slash_date};
use super::rules::patterns::{
    AMOUNT_BARE, AMOUNT_NEXT_LINE, CHECK_DATE_COMPACT, GL_ACCOUNT, GL_ACCOUNT_ROW, LABELED_DATE,
};
use super::{first_match, Strategy};
use crate::models::{AdvanceLine, AdvanceResult, ParserConfig};

/// Extract an Advance Advice page from aggressive-normalized text.
///
/// The amount chain covers the observed layouts in likelihood order. If
/// every strategy misses, the line is still emitted with a zero amount
/// and a descriptive error; it is never dropped.
pub fn extract(text: &str, _config: &ParserConfig) -> AdvanceResult {
    let mut result = AdvanceResult::default();

    let gl_row = |t: &str| {
        t.lines().find_map(|line| {
            GL_ACCOUNT_ROW
                .captures(line)
                .and_then(|caps| parse_signed_currency(&caps[2]))
        })
    };
    let total_charge = |t: &str| {
        // The table's last column is the true total.
        t.lines()
            .find(|line| line.to_uppercase().contains("TOTAL CHARGE"))
            .and_then(rightmost_amount)
    };
    let amount_next_line = |t: &str| {
        AMOUNT_NEXT_LINE
            .captures(t)
            .and_then(|caps| parse_signed_currency(&caps[1]))
    };
    let amount_bare = |t: &str| {
        AMOUNT_BARE
            .captures(t)
            .and_then(|caps| parse_signed_currency(&caps[1]))
    };

    let amount = first_match(
        &[
            Strategy::new("gl-table", &gl_row),
            Strategy::new("total-charge", &total_charge),
            Strategy::new("amount-header", &amount_next_line),
            Strategy::new("amount-bare", &amount_bare),
        ],
        text,
    );

    let amount = match amount {
        Some(hit) => {
            debug!(strategy = hit.strategy, "advance amount matched");
            hit.value
        }
        None => {
            result
                .errors
                .push("Missing advance amount; defaulted to 0".to_string());
            Decimal::ZERO
        }
    };

    let advance_date = {
        let labeled = |t: &str| {
            LABELED_DATE
                .captures(t)
                .and_then(|caps| parse_slash_date(&caps[1]))
        };
        let compact = |t: &str| {
            CHECK_DATE_COMPACT
                .captures(t)
                .and_then(|caps| parse_compact_date(&caps[1]))
        };
        first_match(
            &[
                Strategy::new("labeled-slash", &labeled),
                Strategy::new("labeled-compact", &compact),
            ],
            text,
        )
        .map(|hit| hit.value)
    };

    let gl_account = GL_ACCOUNT.captures(text).map(|caps| caps[1].to_string());

    let description = if text.to_uppercase().contains("CHARGEBACK") {
        Some("ADVANCE CHARGEBACK".to_string())
    } else if text.to_uppercase().contains("CASH ADVANCE") {
        Some("CASH ADVANCE".to_string())
    } else {
        None
    };

    result.lines.push(AdvanceLine {
        amount,
        advance_date,
        gl_account,
        description,
        raw_text: text.to_string(),
    });

    info!(errors = result.errors.len(), "extracted advance advice");
    result
}
