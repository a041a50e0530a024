//! Configuration for the extraction pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};

/// Tunable constants for the parsing engine.
///
/// The defaults encode the conventions observed across real settlement
/// batches; they are configurable so a carrier with different numbering
/// or week conventions does not require a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum digit count for a trip number. A longer leading numeric
    /// field on a settlement row is a bill of lading, not a trip number.
    pub trip_number_max_len: usize,

    /// Tolerance when reconciling summed line amounts against a stated
    /// check total.
    pub check_total_tolerance: Decimal,

    /// Days between the settlement-week end and the check date.
    pub week_end_offset_days: i64,

    /// Length of a settlement week in days.
    pub week_length_days: i64,

    /// Prefix used when synthesizing a payment reference for a batch
    /// whose remittance carries no check number.
    pub payment_ref_prefix: String,

    /// Minimum similarity for treating two payee/agency names as the
    /// same entity.
    pub name_match_threshold: f32,

    /// Maximum lines scanned for charge descriptions on a credit/debit
    /// notification.
    pub description_window_lines: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            trip_number_max_len: 4,
            check_total_tolerance: Decimal::new(5, 2),
            week_end_offset_days: 3,
            week_length_days: 7,
            payment_ref_prefix: "SET".to_string(),
            name_match_threshold: 0.75,
            description_window_lines: 12,
        }
    }
}

impl ParserConfig {
    /// Validate field ranges. Called by the engine before a batch run.
    pub fn validate(&self) -> Result<()> {
        if self.trip_number_max_len == 0 {
            return Err(ParseError::Config {
                field: "trip_number_max_len".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.week_length_days < 1 {
            return Err(ParseError::Config {
                field: "week_length_days".to_string(),
                reason: "must be at least 1 day".to_string(),
            });
        }
        if self.check_total_tolerance < Decimal::ZERO {
            return Err(ParseError::Config {
                field: "check_total_tolerance".to_string(),
                reason: "must be non-negative".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.name_match_threshold) {
            return Err(ParseError::Config {
                field: "name_match_threshold".to_string(),
                reason: "must be within [0, 1]".to_string(),
            });
        }
        Ok(())
    }
}
