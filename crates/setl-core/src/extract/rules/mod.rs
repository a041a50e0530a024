//! Shared micro-parsers and pattern tables for field extraction.

pub mod accounts;
pub mod amounts;
pub mod dates;
pub mod names;
pub mod patterns;

pub use accounts::normalize_account_number;
pub use amounts::{all_amounts, format_currency, parse_signed_currency, rightmost_amount};
pub use dates::{
    parse_compact_date, parse_slash_date, parse_spaced_date, resolve_one_digit_year,
    resolve_two_digit_year,
};
pub use names::{levenshtein, name_similarity, split_person_name};
