//! Reconciliation of extracted amounts against document-stated totals.

use rust_decimal::Decimal;
use tracing::debug;

/// Cross-check the summed line amounts against the total the document
/// itself states. The stated total is printed unsigned, so the absolute
/// value of the sum is compared. Advisory: a mismatch yields one
/// descriptive message and never blocks emission of the lines.
pub fn reconcile_check_total(
    amounts: &[Decimal],
    stated_total: Decimal,
    tolerance: Decimal,
) -> Option<String> {
    let sum: Decimal = amounts.iter().sum();
    let difference = (sum.abs() - stated_total).abs();

    debug!(%sum, %stated_total, %difference, "reconciling check total");

    if difference > tolerance {
        Some(format!(
            "Check total mismatch: extracted lines sum to {} but document states {}",
            sum.abs(),
            stated_total
        ))
    } else {
        None
    }
}
