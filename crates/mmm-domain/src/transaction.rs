//! Domain model for recorded income and expense entries.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// Category labels offered by entry surfaces. The set is open: any free-text
/// label is accepted and aggregates under its own bucket.
pub const SUGGESTED_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Office",
    "Utilities",
    "Entertainment",
    "Other",
];

/// Bucket used when a transaction carries no category label.
pub const DEFAULT_CATEGORY: &str = "Other";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A single recorded income or expense entry.
///
/// `amount` is always non-negative; whether it raises or lowers the balance
/// is carried by `kind`, never by the sign.
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub merchant: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub ownership: Ownership,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slip_url: Option<String>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        merchant: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        ownership: Ownership,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            merchant: merchant.into(),
            amount,
            kind,
            ownership,
            group_id: None,
            category: None,
            items: Vec::new(),
            note: None,
            slip_url: None,
        }
    }

    pub fn with_group(mut self, group_id: Uuid) -> Self {
        self.ownership = Ownership::Group;
        self.group_id = Some(group_id);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_slip_url(mut self, slip_url: impl Into<String>) -> Self {
        self.slip_url = Some(slip_url.into());
        self
    }

    /// Returns the category label used for aggregation, defaulting an absent
    /// category to [`DEFAULT_CATEGORY`].
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Drops a stale group reference on personally-owned entries. Entry
    /// surfaces may hand back a `group_id` left over from a previous
    /// ownership selection; it is ignored rather than rejected.
    pub fn normalize(&mut self) {
        if self.ownership == Ownership::Personal {
            self.group_id = None;
        }
    }

    /// Checks the local validity rules. Group-reference existence is the
    /// store's concern since it needs the group collection.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.merchant.trim().is_empty() {
            return Err(TransactionError::EmptyMerchant);
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(TransactionError::InvalidAmount(self.amount));
        }
        if self.ownership == Ownership::Group && self.group_id.is_none() {
            return Err(TransactionError::MissingGroupReference);
        }
        Ok(())
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} {}", self.date, self.merchant, self.amount)
    }
}

/// Parses a calendar date in the `YYYY-MM-DD` form used by scan payloads
/// and persisted blobs.
pub fn parse_date(value: &str) -> Result<NaiveDate, TransactionError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| TransactionError::UnparseableDate(value.to_string()))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Determines whether the amount raises or lowers the balance.
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// Attributes an entry to an individual or to a shared group budget.
pub enum Ownership {
    Personal,
    Group,
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Ownership::Personal => "personal",
            Ownership::Group => "group",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Validity failures for [`Transaction`] values.
pub enum TransactionError {
    EmptyMerchant,
    InvalidAmount(f64),
    MissingGroupReference,
    UnparseableDate(String),
}

impl fmt::Display for TransactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionError::EmptyMerchant => f.write_str("merchant must not be empty"),
            TransactionError::InvalidAmount(amount) => {
                write!(f, "amount must be a non-negative number, got {amount}")
            }
            TransactionError::MissingGroupReference => {
                f.write_str("group-owned transaction needs a group id")
            }
            TransactionError::UnparseableDate(raw) => {
                write!(f, "`{raw}` is not a YYYY-MM-DD date")
            }
        }
    }
}

impl std::error::Error for TransactionError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            "Starbucks",
            320.0,
            TransactionKind::Expense,
            Ownership::Personal,
        )
    }

    #[test]
    fn validate_rejects_blank_merchant() {
        let mut txn = sample();
        txn.merchant = "   ".into();
        assert_eq!(txn.validate(), Err(TransactionError::EmptyMerchant));
    }

    #[test]
    fn validate_rejects_negative_and_nan_amounts() {
        let mut txn = sample();
        txn.amount = -1.0;
        assert!(matches!(
            txn.validate(),
            Err(TransactionError::InvalidAmount(_))
        ));
        txn.amount = f64::NAN;
        assert!(matches!(
            txn.validate(),
            Err(TransactionError::InvalidAmount(_))
        ));
    }

    #[test]
    fn validate_requires_group_id_for_group_ownership() {
        let mut txn = sample();
        txn.ownership = Ownership::Group;
        assert_eq!(txn.validate(), Err(TransactionError::MissingGroupReference));
    }

    #[test]
    fn normalize_drops_stale_group_reference() {
        let mut txn = sample();
        txn.group_id = Some(Uuid::new_v4());
        txn.normalize();
        assert_eq!(txn.group_id, None);
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn kind_and_ownership_serialize_lowercase() {
        let txn = sample();
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"kind\":\"expense\""));
        assert!(json.contains("\"ownership\":\"personal\""));
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(
            parse_date("2024-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
        assert!(parse_date("31/01/2024").is_err());
    }
}
