//! Compiled regex tables shared across the extractors.
//!
//! All patterns are module-level constants built once at first use and
//! shared across threads; none are mutated after construction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Currency amounts: optional dollar sign, thousands commas (OCR
    // drops them often enough that they cannot be required), and the
    // OCR-dominant trailing minus alongside the ordinary leading minus.
    pub static ref AMOUNT: Regex = Regex::new(
        r"\$?\s*-?\d[\d,]*\.\d{2}-?"
    ).unwrap();

    // Date encodings
    pub static ref SLASH_DATE: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref COMPACT_DATE: Regex = Regex::new(
        r"\b(\d{2})(\d{2})(\d{2})\b"
    ).unwrap();

    pub static ref SPACED_DATE: Regex = Regex::new(
        r"\b(\d{1,2})\s+(\d{1,2})\s+(\d)\b"
    ).unwrap();

    // Settlement Detail transaction rows, strictest first. Matched
    // against single lines, so the anchors cover the whole row.
    pub static ref SETTLEMENT_ROW_FULL: Regex = Regex::new(
        r"^\s*(\d{1,10})\s+(\d{1,10})(?:\s+(\d{1,10}))?\s+(\d{1,2}/\d{1,2}/\d{2,4})\s+([A-Z]{2,3})\s+(.+?)\s+(\$?\d[\d,]*\.\d{2}-?)\s*$"
    ).unwrap();

    pub static ref SETTLEMENT_ROW_ONE_NUMBER: Regex = Regex::new(
        r"^\s*(\d{1,10})\s+(\d{1,2}/\d{1,2}/\d{2,4})\s+([A-Z]{2,3})\s+(.+?)\s+(\$?\d[\d,]*\.\d{2}-?)\s*$"
    ).unwrap();

    pub static ref SETTLEMENT_ROW_MINIMAL: Regex = Regex::new(
        r"^\s*(\d{1,2}/\d{1,2}/\d{2,4})\s+([A-Z]{2,3})\s+(.+?)\s+(\$?\d[\d,]*\.\d{2}-?)\s*$"
    ).unwrap();

    // A row that starts like a transaction (leading numerics and a date
    // followed by a code) even if the amount fails to parse; used to
    // report skipped rows instead of silently dropping them.
    pub static ref SETTLEMENT_ROW_SHAPE: Regex = Regex::new(
        r"^\s*(?:\d{1,10}\s+){0,3}\d{1,2}/\d{1,2}/\d{2,4}\s+[A-Z]{2,3}\s+\S"
    ).unwrap();

    pub static ref CHECK_TOTAL: Regex = Regex::new(
        r"(?i)<?\s*CHECK\s+TOTAL\s*>?\s*[:.]?\s*(\$?\d[\d,]*\.\d{2}-?)"
    ).unwrap();

    pub static ref SETTLEMENT_DATE: Regex = Regex::new(
        r"(?i)(?:SETTLEMENT|STATEMENT)\s+DATE\s*[:.]?\s*(\d{1,2}/\d{1,2}/\d{2,4})"
    ).unwrap();

    // Agency header, shared by remittance and settlement pages.
    pub static ref AGENCY_CODE: Regex = Regex::new(
        r"(?i)\bAGENCY\s*(?:NO\.?|#|CODE)?\s*[:.]?\s*(\d{2,6})\b"
    ).unwrap();

    pub static ref AGENCY_NAME: Regex = Regex::new(
        r"(?i)\bAGENCY\s*(?:NO\.?|#|CODE)?\s*[:.]?\s*\d{2,6}\s*[-]?\s+([A-Z][A-Z0-9 &.,'-]+)"
    ).unwrap();

    // Remittance check header
    pub static ref CHECK_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)\bCHECK\s*(?:NO\.?|NUMBER|#)\s*[:.]?\s*(\d+)"
    ).unwrap();

    pub static ref CHECK_NUMBER_BARE: Regex = Regex::new(
        r"(?i)\bCHECK\s+(\d{4,})\b"
    ).unwrap();

    pub static ref CHECK_DATE_LABELED: Regex = Regex::new(
        r"(?i)\b(?:CHECK\s+)?DATE\s*[:.]?\s*(\d{1,2}/\d{1,2}/\d{2,4})\b"
    ).unwrap();

    pub static ref CHECK_DATE_COMPACT: Regex = Regex::new(
        r"(?i)\b(?:CHECK\s+)?DATE\s*[:.]?\s*(\d{6})\b"
    ).unwrap();

    pub static ref CHECK_AMOUNT_LABELED: Regex = Regex::new(
        r"(?i)\b(?:CHECK\s+)?AMOUNT\s*[:.]?\s*\$?\s*(\d[\d,]*\.\d{2}-?)"
    ).unwrap();

    pub static ref PAY_EXACTLY: Regex = Regex::new(
        r"(?i)\bPAY\s+EXACTLY\b.*?(\$?\d[\d,]*\.\d{2})"
    ).unwrap();

    pub static ref PAYEE_ORDER_OF: Regex = Regex::new(
        r"(?i)PAY\s+TO\s+THE\s+ORDER\s+OF\s*[:.]?[ \t]*(\S[^\n]*)?"
    ).unwrap();

    pub static ref PAYEE_LABEL: Regex = Regex::new(
        r"(?i)\bPAYEE\s*[:.]?[ \t]*(\S[^\n]*)"
    ).unwrap();

    pub static ref BANK_ACCOUNT: Regex = Regex::new(
        r"(?i)\bACCOUNT\s*(?:NO\.?|NUMBER|#)?\s*[:.]?\s*(\d[\d-]*)"
    ).unwrap();

    // Revenue Distribution
    pub static ref TRIP_LABELED: Regex = Regex::new(
        r"(?i)\bTRIP\s*(?:NO\.?|NUMBER|#)\s*[:.]?\s*(\d+)"
    ).unwrap();

    pub static ref TRIP_BARE: Regex = Regex::new(
        r"(?i)\bTRIP\s+(\d+)\b"
    ).unwrap();

    pub static ref BILL_OF_LADING: Regex = Regex::new(
        r"(?i)\b(?:BILL\s+OF\s+LADING|B/L)\s*(?:NO\.?|#)?\s*[:.]?\s*(\d+)"
    ).unwrap();

    pub static ref SERVICE_PERFORMED_BY: Regex = Regex::new(
        r"(?i)FOR\s+SERVICE\s+PERFORMED\s+BY\s*[:.]?[ \t]*([^\n]*)"
    ).unwrap();

    pub static ref ROUTE_PAIR: Regex = Regex::new(
        r"([A-Z][A-Za-z .]*?),\s*([A-Z]{2})\b\s+(?:TO\s+)?([A-Z][A-Za-z .]*?),\s*([A-Z]{2})\b"
    ).unwrap();

    // Delivery date renderings, anchored to the P-code that follows the
    // date column on these pages.
    pub static ref DELIVERY_DOT: Regex = Regex::new(
        r"\b(\d{1,2})\.(\d{1,2})\s+P\d+"
    ).unwrap();

    pub static ref DELIVERY_SPACED: Regex = Regex::new(
        r"\b(\d{1,2})\s+(\d{1,2})\s+(\d)\s+P\d+"
    ).unwrap();

    pub static ref DELIVERY_MERGED: Regex = Regex::new(
        r"\b(\d{1,2})\s+(\d{2})(\d)\s+P\d+"
    ).unwrap();

    pub static ref DELIVERY_HEADER: Regex = Regex::new(
        r"(?i)DELIVERY\s+DATE\s*[:.]?\s*(\d{1,2}/\d{1,2}/\d{2,4})"
    ).unwrap();

    pub static ref NVL_ENTRY_DATE: Regex = Regex::new(
        r"(?i)\bNVL\s+ENTRY\s*[:.]?\s*(\d{1,2}/\d{1,2}/\d{2,4})"
    ).unwrap();

    pub static ref SERVICE_ITEM_ROW: Regex = Regex::new(
        r"^\s*([A-Z][A-Z0-9 /&.'-]*?)\s+(\$?\d[\d,]*\.\d{2}-?)(?:\s+(\d{1,3}(?:\.\d+)?)%\s+(\$?\d[\d,]*\.\d{2}-?))?\s*$"
    ).unwrap();

    pub static ref NET_BALANCE: Regex = Regex::new(
        r"(?i)\bNET\s+BALANCE(?:\s+DUE)?\s*[:.]?\s*(\$?\d[\d,]*\.\d{2}-?)"
    ).unwrap();

    // Advance Advice
    pub static ref GL_ACCOUNT_ROW: Regex = Regex::new(
        r"(?i)\bG/?L\s*(?:ACCT|ACCOUNT)?\s*#?\s*[:.]?\s*(\d[\d-]*)\s+.*?(\$?\d[\d,]*\.\d{2}-?)"
    ).unwrap();

    pub static ref GL_ACCOUNT: Regex = Regex::new(
        r"(?i)\bG/?L\s*(?:ACCT|ACCOUNT)?\s*#?\s*[:.]?\s*(\d[\d-]*)"
    ).unwrap();

    pub static ref AMOUNT_NEXT_LINE: Regex = Regex::new(
        r"(?i)\bAMOUNT\b[^\S\n]*\n\s*(\$?\d[\d,]*\.\d{2}-?)"
    ).unwrap();

    pub static ref AMOUNT_BARE: Regex = Regex::new(
        r"(?i)\bAMOUNT\b\s*[:.]?\s*\$?\s*(\d[\d,]*\.\d{2}-?)"
    ).unwrap();

    // Posting Ticket
    pub static ref POSTING_KIND_AMOUNT: Regex = Regex::new(
        r"(?i)\b(DEBIT|CREDIT)\b[^\n$]*?(\$?\d[\d,]*\.\d{2}-?)"
    ).unwrap();

    pub static ref LABELED_DATE: Regex = Regex::new(
        r"(?i)\bDATE\s*[:.]?\s*(\d{1,2}/\d{1,2}/\d{2,4})\b"
    ).unwrap();

    // A line containing nothing but digits, punctuation, or whitespace;
    // excluded from description collection.
    pub static ref NON_TEXT_LINE: Regex = Regex::new(
        r"^[\d\s.,$#/-]*$"
    ).unwrap();
}
