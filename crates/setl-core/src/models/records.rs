//! Result records produced by the per-document extractors.
//!
//! Every record is an immutable value constructed once per parse call.
//! The `errors` vectors are informational and additive: an empty line list
//! with a populated error list is a valid outcome, never an exception.
//! Each extracted line keeps a raw echo of the source fragment it came
//! from so a reviewer can trace any value back to the OCR text.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::document::{DocumentType, LineType, OcrProvider};

/// One transaction row from a Settlement Detail table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementLine {
    /// Bill of lading, present on revenue rows that link to a Revenue
    /// Distribution page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_of_lading: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    pub date: NaiveDate,

    /// Two/three-letter transaction code as printed (e.g. "RD", "CM").
    pub transaction_code: String,

    pub description: String,

    /// Signed amount; deductions and reversals are negative.
    pub amount: Decimal,

    pub line_type: LineType,

    /// Trip metadata joined from a same-batch Revenue Distribution page,
    /// keyed by bill of lading. Populated by the second extraction pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<TripLinkage>,

    /// Verbatim source row.
    pub raw_line: String,
}

/// Trip metadata carried from a Revenue Distribution page onto the
/// settlement row it settles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripLinkage {
    pub bill_of_lading: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_last_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
}

/// Parsed Settlement Detail page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettlementResult {
    pub lines: Vec<SettlementLine>,

    /// Authoritative total stated by the document, used for
    /// reconciliation. Always non-negative as printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_total: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,

    pub errors: Vec<String>,
}

/// One priced service item on a Revenue Distribution page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    pub description: String,

    pub amount: Decimal,

    /// Agency share percentage, when the item is split.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,

    /// Earnings after applying the percentage split.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earnings: Option<Decimal>,
}

/// One trip breakdown from a Revenue Distribution page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_of_lading: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_last_name: Option<String>,

    /// Origin as "City, ST".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Destination as "City, ST".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,

    pub service_items: Vec<ServiceItem>,

    /// Net amount due the agency for this trip. Required by the
    /// downstream ledger; defaults to zero (with an error recorded)
    /// when the document does not state it.
    pub net_balance: Decimal,

    /// Verbatim source text of the page region this line came from.
    pub raw_text: String,
}

/// Parsed Revenue Distribution page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevenueResult {
    pub lines: Vec<RevenueLine>,
    pub errors: Vec<String>,
}

/// How a remittance was paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Electronic Transfer")]
    ElectronicTransfer,
    Check,
}

/// Parsed Remittance (payment advice) page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemittanceResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_amount: Option<Decimal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_address: Option<String>,

    /// Bank account with leading zeros stripped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,

    /// Batch metadata derived from the check header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BatchMetadata>,

    pub errors: Vec<String>,

    /// Verbatim normalized page text.
    pub raw_text: String,
}

/// Whether a posted amount debits or credits the agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Debit,
    Credit,
}

/// Parsed Posting Ticket page: one miscellaneous debit or credit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gl_account: Option<String>,

    pub description: String,

    pub amount: Decimal,

    pub kind: EntryKind,

    pub raw_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingResult {
    pub lines: Vec<PostingLine>,
    pub errors: Vec<String>,
}

/// One charge or credit from a Credit/Debit Notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeLine {
    pub description: String,
    pub amount: Decimal,
    pub kind: EntryKind,
    pub raw_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditDebitResult {
    pub lines: Vec<ChargeLine>,
    pub errors: Vec<String>,
}

/// Parsed Advance Advice page: one cash advance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceLine {
    pub amount: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gl_account: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub raw_text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvanceResult {
    pub lines: Vec<AdvanceLine>,
    pub errors: Vec<String>,
}

/// Canonical batch header derived from the Remittance (or, failing that,
/// the Settlement Detail) page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMetadata {
    /// Check number, or a synthesized reference when none was printed.
    /// Never empty.
    pub payment_reference: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_end_date: Option<NaiveDate>,
}

/// Extraction output for one classified page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParsedDocument {
    Remittance(RemittanceResult),
    SettlementDetail(SettlementResult),
    RevenueDistribution(RevenueResult),
    PostingTicket(PostingResult),
    CreditDebit(CreditDebitResult),
    AdvanceAdvice(AdvanceResult),
    /// Unclassifiable page; left for the orchestration layer to route.
    Unknown,
}

impl ParsedDocument {
    /// Extraction errors collected for this page.
    pub fn errors(&self) -> &[String] {
        match self {
            ParsedDocument::Remittance(r) => &r.errors,
            ParsedDocument::SettlementDetail(r) => &r.errors,
            ParsedDocument::RevenueDistribution(r) => &r.errors,
            ParsedDocument::PostingTicket(r) => &r.errors,
            ParsedDocument::CreditDebit(r) => &r.errors,
            ParsedDocument::AdvanceAdvice(r) => &r.errors,
            ParsedDocument::Unknown => &[],
        }
    }
}

/// Per-page parse result handed to the persistence collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult {
    pub page_number: u32,
    pub document_type: DocumentType,
    pub provider: OcrProvider,
    pub document: ParsedDocument,
}
