//! Date parsing for the three OCR date encodings.
//!
//! Short years resolve against the wall clock: two-digit years land in the
//! current century, one-digit years in the current decade. Out-of-range
//! month/day components make the whole parse fail; a wrong-but-plausible
//! date must never be produced by clamping.

use chrono::{Datelike, NaiveDate, Utc};

use super::patterns::{COMPACT_DATE, SLASH_DATE, SPACED_DATE};

/// Resolve a two-digit year into the current century.
pub fn resolve_two_digit_year(yy: u32) -> i32 {
    let century = (Utc::now().year() / 100) * 100;
    century + yy as i32
}

/// Resolve a one-digit year into the current decade.
pub fn resolve_one_digit_year(y: u32) -> i32 {
    let decade = (Utc::now().year() / 10) * 10;
    decade + y as i32
}

/// Build a date from components, enforcing month 1-12 and day 1-31.
/// Calendar-invalid combinations (e.g. February 31) are also rejected.
pub fn date_from_parts(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `MM/DD/YY` or `MM/DD/YYYY`.
pub fn parse_slash_date(token: &str) -> Option<NaiveDate> {
    let caps = SLASH_DATE.captures(token.trim())?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year_raw: u32 = caps[3].parse().ok()?;

    let year = if year_raw < 100 {
        resolve_two_digit_year(year_raw)
    } else {
        year_raw as i32
    };
    date_from_parts(year, month, day)
}

/// Parse the compact `MMDDYY` rendering.
pub fn parse_compact_date(token: &str) -> Option<NaiveDate> {
    let trimmed = token.trim();
    if trimmed.len() != 6 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let caps = COMPACT_DATE.captures(trimmed)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let yy: u32 = caps[3].parse().ok()?;
    date_from_parts(resolve_two_digit_year(yy), month, day)
}

/// Parse the space-separated `MM DD Y` rendering with a one-digit year.
pub fn parse_spaced_date(token: &str) -> Option<NaiveDate> {
    let caps = SPACED_DATE.captures(token.trim())?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let y: u32 = caps[3].parse().ok()?;
    date_from_parts(resolve_one_digit_year(y), month, day)
}
