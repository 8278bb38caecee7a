//! Transaction primitives.
//!
//! A `Transaction` is a single income or expense record. Its `category` is a
//! free-form tag matched by name against the taxonomy of the same kind.

use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::{Amount, EngineError, categories::normalize_category_name};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::Validation(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: String,
    /// RFC3339 timestamp as supplied by the client.
    pub date: DateTime<FixedOffset>,
}

/// Input for [`Engine::add_transaction`](crate::Engine::add_transaction).
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub category: String,
    pub date: DateTime<FixedOffset>,
}

impl NewTransaction {
    /// Check the record-level invariants and return the normalized category.
    ///
    /// Categories get the same normalization as taxonomy names.
    pub(crate) fn validate(&self) -> Result<String, EngineError> {
        if !self.amount.is_positive() {
            return Err(EngineError::Validation(
                "amount must be greater than zero".to_string(),
            ));
        }
        self.amount.ensure_bounded()?;
        normalize_category_name(&self.category)
    }

    pub(crate) fn into_transaction(self, id: u64, category: String) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category,
            date: self.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_only_known_values() {
        assert_eq!("income".parse::<TransactionKind>(), Ok(TransactionKind::Income));
        assert_eq!("expense".parse::<TransactionKind>(), Ok(TransactionKind::Expense));
        assert!(matches!(
            "refund".parse::<TransactionKind>(),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn transaction_serializes_kind_as_type() {
        let tx = Transaction {
            id: 1,
            kind: TransactionKind::Income,
            amount: Amount::from_units(2000),
            category: "Salary".to_string(),
            date: DateTime::parse_from_rfc3339("2024-01-05T00:00:00Z").unwrap(),
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["amount"], 2000);
        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn validate_rejects_non_positive_amounts() {
        let new = NewTransaction {
            kind: TransactionKind::Expense,
            amount: Amount::ZERO,
            category: "Food".to_string(),
            date: DateTime::parse_from_rfc3339("2024-01-05T00:00:00Z").unwrap(),
        };
        assert!(matches!(new.validate(), Err(EngineError::Validation(_))));
    }

    #[test]
    fn validate_normalizes_category() {
        let new = NewTransaction {
            kind: TransactionKind::Expense,
            amount: Amount::from_units(5),
            category: "  Food ".to_string(),
            date: DateTime::parse_from_rfc3339("2024-01-05T00:00:00Z").unwrap(),
        };
        assert_eq!(new.validate().unwrap(), "Food");

        let blank = NewTransaction {
            category: "   ".to_string(),
            ..new.clone()
        };
        assert!(blank.validate().is_err());

        let decomposed = NewTransaction {
            category: "Cafe\u{301}".to_string(),
            ..new.clone()
        };
        assert_eq!(decomposed.validate().unwrap(), "Caf\u{e9}");

        let huge = NewTransaction {
            amount: Amount::new(Amount::MAX.cents() + 1),
            ..new
        };
        assert!(matches!(huge.validate(), Err(EngineError::Validation(_))));
    }
}
