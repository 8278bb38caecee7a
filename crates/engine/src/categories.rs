//! Category taxonomy: one ordered list of names per transaction kind.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine, TransactionKind};

const DEFAULT_INCOME: [&str; 5] = ["Salary", "Freelance", "Gift", "Investment", "Other"];
const DEFAULT_EXPENSE: [&str; 7] = [
    "Food",
    "Housing",
    "Transport",
    "Entertainment",
    "Utilities",
    "Health",
    "Other",
];

/// The two category lists. Names are unique within a list, not across lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categories {
    #[serde(rename = "incomeCategories")]
    pub income: Vec<String>,
    #[serde(rename = "expenseCategories")]
    pub expense: Vec<String>,
}

impl Default for Categories {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME.iter().map(ToString::to_string).collect(),
            expense: DEFAULT_EXPENSE.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Categories {
    pub fn list(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    pub(crate) fn list_mut(&mut self, kind: TransactionKind) -> &mut Vec<String> {
        match kind {
            TransactionKind::Income => &mut self.income,
            TransactionKind::Expense => &mut self.expense,
        }
    }

    pub fn contains(&self, kind: TransactionKind, name: &str) -> bool {
        self.position(kind, name).is_some()
    }

    pub(crate) fn position(&self, kind: TransactionKind, name: &str) -> Option<usize> {
        self.list(kind).iter().position(|existing| existing == name)
    }
}

/// Trim and NFC-normalize a category name so visually equal names compare equal.
pub(crate) fn normalize_category_name(value: &str) -> ResultEngine<String> {
    let normalized: String = value.trim().nfc().collect();
    if normalized.is_empty() {
        return Err(EngineError::Validation(
            "category name must not be empty".to_string(),
        ));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_seed_lists() {
        let categories = Categories::default();
        assert_eq!(categories.income.len(), 5);
        assert_eq!(categories.expense.first().map(String::as_str), Some("Food"));
        assert!(categories.contains(TransactionKind::Income, "Other"));
        assert!(categories.contains(TransactionKind::Expense, "Other"));
    }

    #[test]
    fn normalize_trims_and_composes() {
        assert_eq!(normalize_category_name("  Rent ").unwrap(), "Rent");
        // "e" followed by a combining acute accent composes to "é".
        assert_eq!(normalize_category_name("Cafe\u{301}").unwrap(), "Caf\u{e9}");
        assert!(normalize_category_name("   ").is_err());
    }
}
