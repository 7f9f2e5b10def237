//! Transaction model
//!
//! A single household purchase: when, how much, which category, and who paid.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::month::MonthKey;
use super::party::Buyer;

/// A household expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Transaction date
    #[serde(deserialize_with = "deserialize_iso_date")]
    pub date: NaiveDate,

    /// Amount spent (never negative)
    pub amount: Money,

    /// Category the spend counts against
    pub category_id: CategoryId,

    /// Who paid
    pub buyer: Buyer,

    /// Where the purchase was made
    #[serde(default)]
    pub location: String,

    /// Free-form notes
    #[serde(default)]
    pub description: String,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

/// Parse a calendar date in the zero-padded `YYYY-MM-DD` form only
///
/// `2024-3-21` and `2024-03-21T00:00` are rejected even though chrono's
/// `%Y-%m-%d` would accept the first.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let canonical = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !canonical {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn deserialize_iso_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_iso_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD", s)))
}

impl Transaction {
    /// Create a new transaction
    pub fn new(date: NaiveDate, amount: Money, category_id: CategoryId, buyer: Buyer) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            date,
            amount,
            category_id,
            buyer,
            location: String::new(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a transaction with all common fields
    pub fn with_details(
        date: NaiveDate,
        amount: Money,
        category_id: CategoryId,
        buyer: Buyer,
        location: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut txn = Self::new(date, amount, category_id, buyer);
        txn.location = location.into();
        txn.description = description.into();
        txn
    }

    /// The month this transaction is grouped under
    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    /// Check if this transaction falls in the given month
    pub fn is_in_month(&self, month: MonthKey) -> bool {
        month.contains(self.date)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }

        if self.location.len() > 100 {
            return Err(TransactionValidationError::TextTooLong {
                field: "location",
                len: self.location.len(),
            });
        }

        if self.description.len() > 500 {
            return Err(TransactionValidationError::TextTooLong {
                field: "description",
                len: self.description.len(),
            });
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.amount,
            self.buyer
        )?;
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    TextTooLong { field: &'static str, len: usize },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative ({})", amount)
            }
            Self::TextTooLong { field, len } => {
                write!(f, "The {} is too long ({} chars)", field, len)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(march(22), Money::from_cents(15000), CategoryId::new(2), Buyer::PartyA);
        assert_eq!(txn.amount.cents(), 15000);
        assert_eq!(txn.buyer, Buyer::PartyA);
        assert!(txn.location.is_empty());
        assert_eq!(txn.created_at, txn.updated_at);
    }

    #[test]
    fn test_month_grouping() {
        let txn = Transaction::new(march(31), Money::from_cents(100), CategoryId::new(1), Buyer::Joint);
        assert_eq!(txn.month().to_string(), "2024-03");
        assert!(txn.is_in_month(MonthKey::new(2024, 3).unwrap()));
        assert!(!txn.is_in_month(MonthKey::new(2024, 4).unwrap()));
    }

    #[test]
    fn test_validation() {
        let mut txn = Transaction::new(march(1), Money::zero(), CategoryId::new(1), Buyer::PartyB);
        assert!(txn.validate().is_ok());

        txn.amount = Money::from_cents(-500);
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(Money::from_cents(-500)))
        );

        txn.amount = Money::from_cents(500);
        txn.location = "x".repeat(101);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::TextTooLong { field: "location", .. })
        ));
    }

    #[test]
    fn test_serialization() {
        let txn = Transaction::with_details(
            march(21),
            Money::from_cents(4500),
            CategoryId::new(3),
            Buyer::PartyB,
            "Cafe Nero",
            "Lunch",
        );

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"date\":\"2024-03-21\""));
        assert!(json.contains("\"buyer\":\"party_b\""));

        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(txn, deserialized);
    }

    #[test]
    fn test_malformed_date_is_rejected_on_load() {
        let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","date":"2024-3-21",
            "amount":100,"category_id":1,"buyer":"joint",
            "created_at":"2024-03-21T00:00:00Z","updated_at":"2024-03-21T00:00:00Z"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());

        let impossible = json.replace("2024-3-21", "2024-02-30");
        assert!(serde_json::from_str::<Transaction>(&impossible).is_err());

        let canonical = json.replace("2024-3-21", "2024-03-21");
        let txn: Transaction = serde_json::from_str(&canonical).unwrap();
        assert_eq!(txn.date, march(21));
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2024-03-21"), Some(march(21)));
        assert_eq!(parse_iso_date("2024-3-21"), None);
        assert_eq!(parse_iso_date("2024-03-1"), None);
        assert_eq!(parse_iso_date("+2024-03-21"), None);
        assert_eq!(parse_iso_date("2024-02-30"), None);
        assert_eq!(parse_iso_date("2024/03/21"), None);
    }

    #[test]
    fn test_display() {
        let mut txn = Transaction::new(march(22), Money::from_cents(15000), CategoryId::new(2), Buyer::PartyA);
        assert_eq!(format!("{}", txn), "2024-03-22 $150.00 Party A");
        txn.description = "Weekly shopping".to_string();
        assert_eq!(format!("{}", txn), "2024-03-22 $150.00 Party A Weekly shopping");
    }
}
