//! Account number canonicalization.

/// Reduce an OCR'd account number to its canonical form: digits only,
/// leading zeros stripped. A run of zeros collapses to "0" rather than
/// the empty string.
pub fn normalize_account_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        Some("0".to_string())
    } else {
        Some(stripped.to_string())
    }
}
