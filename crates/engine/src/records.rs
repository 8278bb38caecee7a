//! The persisted document: every transaction, both category lists and the id
//! counter. Storage backends load and save it as a whole.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{Amount, Categories, Transaction, TransactionKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Records {
    pub transactions: Vec<Transaction>,
    #[serde(flatten)]
    pub categories: Categories,
    /// Next id to hand out. Never decreases, so ids are not reused after a delete.
    pub next_id: u64,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            categories: Categories::default(),
            next_id: 1,
        }
    }
}

impl Records {
    /// Default categories plus a demo history: a few entries this month and
    /// three months each in 2024 and 2025.
    pub fn demo(tz: Tz) -> Self {
        let now = Utc::now().fixed_offset();
        let five_days_ago = now - Duration::days(5);

        let entries: Vec<(TransactionKind, i64, &str, DateTime<FixedOffset>)> = vec![
            (TransactionKind::Income, 3200, "Salary", now),
            (TransactionKind::Expense, 1100, "Housing", now),
            (TransactionKind::Expense, 85, "Transport", now),
            (TransactionKind::Expense, 45, "Health", five_days_ago),
            (TransactionKind::Income, 3100, "Salary", local_midnight(tz, 2025, 1, 5)),
            (TransactionKind::Expense, 180, "Food", local_midnight(tz, 2025, 1, 15)),
            (TransactionKind::Income, 3100, "Salary", local_midnight(tz, 2025, 2, 5)),
            (TransactionKind::Expense, 220, "Entertainment", local_midnight(tz, 2025, 2, 20)),
            (TransactionKind::Income, 3000, "Salary", local_midnight(tz, 2024, 1, 5)),
            (TransactionKind::Expense, 800, "Housing", local_midnight(tz, 2024, 1, 10)),
            (TransactionKind::Income, 3000, "Salary", local_midnight(tz, 2024, 2, 5)),
            (TransactionKind::Expense, 120, "Utilities", local_midnight(tz, 2024, 2, 12)),
            (TransactionKind::Income, 3000, "Salary", local_midnight(tz, 2024, 3, 5)),
            (TransactionKind::Expense, 250, "Entertainment", local_midnight(tz, 2024, 3, 20)),
            (TransactionKind::Income, 500, "Freelance", local_midnight(tz, 2024, 3, 25)),
        ];

        let transactions: Vec<Transaction> = entries
            .into_iter()
            .zip(1u64..)
            .map(|((kind, units, category, date), id)| Transaction {
                id,
                kind,
                amount: Amount::from_units(units),
                category: category.to_string(),
                date,
            })
            .collect();
        let next_id = transactions.len() as u64 + 1;

        Self {
            transactions,
            categories: Categories::default(),
            next_id,
        }
    }
}

fn local_midnight(tz: Tz, year: i32, month: u32, day: u32) -> DateTime<FixedOffset> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|local| local.fixed_offset())
        .unwrap_or_else(|| Utc::now().fixed_offset())
}
