//! Contract for the external receipt-scanning capability.
//!
//! The AI-vision integration itself lives outside this crate; the core only
//! fixes the payload shape, the adapter trait, and the guarantee that a
//! failed scan degrades to a safe prefill instead of surfacing an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use mmm_domain::{parse_date, Ownership, Transaction, TransactionKind, DEFAULT_CATEGORY};

/// Merchant marker carried by the fallback record so entry surfaces can show
/// the user what happened and hand over to manual entry.
pub const SCAN_ERROR_MERCHANT: &str = "Error Scanning";

/// Merchant substitute when the vision service finds none on the slip.
pub const UNKNOWN_MERCHANT: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Candidate transaction fields extracted from a receipt image.
pub struct ScanResult {
    pub merchant: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    pub items: Vec<String>,
}

impl ScanResult {
    /// The documented safe fallback returned for any adapter failure.
    pub fn fallback(today: NaiveDate) -> Self {
        Self {
            merchant: SCAN_ERROR_MERCHANT.into(),
            amount: 0.0,
            date: today,
            category: DEFAULT_CATEGORY.into(),
            items: Vec::new(),
        }
    }

    /// Patches partially-filled payloads the way the vision service's
    /// consumers expect: blank merchant and category get placeholders, a
    /// non-finite amount collapses to zero.
    pub fn sanitized(mut self) -> Self {
        if self.merchant.trim().is_empty() {
            self.merchant = UNKNOWN_MERCHANT.into();
        }
        if self.category.trim().is_empty() {
            self.category = DEFAULT_CATEGORY.into();
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            self.amount = 0.0;
        }
        self
    }

    /// Prefills a transaction for the user to edit and confirm. Slips are
    /// treated as personal expenses until the user says otherwise.
    pub fn into_transaction(self) -> Transaction {
        let category = self.category;
        Transaction::new(
            self.date,
            self.merchant,
            self.amount,
            TransactionKind::Expense,
            Ownership::Personal,
        )
        .with_category(category)
        .with_items(self.items)
    }
}

/// Parses the `YYYY-MM-DD` date string a scan payload carries, falling back
/// to `today` when the field is missing or garbled.
pub fn scan_date_or_today(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.and_then(|value| parse_date(value).ok()).unwrap_or(today)
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan credential missing")]
    MissingCredential,
    #[error("scan request failed: {0}")]
    Network(String),
    #[error("unparseable scan response: {0}")]
    Parse(String),
}

/// External capability turning a receipt image into candidate fields.
///
/// One in-flight request per invocation, no automatic retry; callers discard
/// stale results if the user has moved on.
pub trait SlipScanner: Send + Sync {
    fn scan_slip(&self, image: &[u8], mime_type: &str) -> Result<ScanResult, ScanError>;
}

/// Runs a scan and converts any failure into the safe fallback record.
///
/// Never panics and never touches the ledger; recording the result is a
/// separate, user-confirmed step.
pub fn scan_or_fallback(
    scanner: &dyn SlipScanner,
    image: &[u8],
    mime_type: &str,
    today: NaiveDate,
) -> ScanResult {
    match scanner.scan_slip(image, mime_type) {
        Ok(result) => result.sanitized(),
        Err(err) => {
            error!(error = %err, "slip scan failed, returning fallback");
            ScanResult::fallback(today)
        }
    }
}
