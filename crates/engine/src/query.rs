//! Period filtering and totals over a transaction snapshot.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::{Amount, Period, Transaction, TransactionKind};

/// Totals over a set of transactions. `balance` is always income minus expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub balance: Amount,
}

/// Keep the transactions falling inside `period`, in their original order.
///
/// `None` returns everything.
pub fn query_transactions(
    transactions: &[Transaction],
    period: Option<Period>,
    tz: Tz,
) -> Vec<Transaction> {
    match period {
        None => transactions.to_vec(),
        Some(period) => transactions
            .iter()
            .filter(|tx| period.contains(&tx.date, tz))
            .cloned()
            .collect(),
    }
}

pub fn summarize(transactions: &[Transaction]) -> Summary {
    let total_of = |kind: TransactionKind| -> Amount {
        transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount)
            .sum()
    };
    let total_income = total_of(TransactionKind::Income);
    let total_expenses = total_of(TransactionKind::Expense);

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

/// The `limit` most recent transactions, newest first.
///
/// Transactions sharing a timestamp keep their insertion (id) order.
pub fn latest(mut transactions: Vec<Transaction>, limit: usize) -> Vec<Transaction> {
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
    transactions.truncate(limit);
    transactions
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;

    fn tx(id: u64, kind: TransactionKind, units: i64, date: &str) -> Transaction {
        Transaction {
            id,
            kind,
            amount: Amount::from_units(units),
            category: "Other".to_string(),
            date: DateTime::parse_from_rfc3339(date).unwrap(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, TransactionKind::Income, 3000, "2024-01-05T00:00:00Z"),
            tx(2, TransactionKind::Expense, 800, "2024-01-10T00:00:00Z"),
            tx(3, TransactionKind::Expense, 120, "2024-02-12T00:00:00Z"),
            tx(4, TransactionKind::Income, 3100, "2025-01-05T00:00:00Z"),
        ]
    }

    fn ids(txs: &[Transaction]) -> Vec<u64> {
        txs.iter().map(|tx| tx.id).collect()
    }

    #[test]
    fn no_period_returns_everything() {
        assert_eq!(ids(&query_transactions(&sample(), None, Tz::UTC)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn year_and_month_filters() {
        let txs = sample();
        assert_eq!(
            ids(&query_transactions(&txs, Some(Period::year(2024)), Tz::UTC)),
            vec![1, 2, 3]
        );
        assert_eq!(
            ids(&query_transactions(&txs, Some(Period::month(2024, 1).unwrap()), Tz::UTC)),
            vec![1, 2]
        );
        assert!(query_transactions(&txs, Some(Period::year(1999)), Tz::UTC).is_empty());
    }

    #[test]
    fn summary_of_empty_input_is_zero() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn summary_balance_is_income_minus_expenses() {
        let summary = summarize(&sample());
        assert_eq!(summary.total_income, Amount::from_units(6100));
        assert_eq!(summary.total_expenses, Amount::from_units(920));
        assert_eq!(summary.balance, Amount::from_units(5180));

        let only_expenses = summarize(&sample()[1..3]);
        assert_eq!(only_expenses.balance, Amount::from_units(-920));
    }

    #[test]
    fn latest_sorts_newest_first_with_stable_ties() {
        let mut txs = sample();
        txs.push(tx(5, TransactionKind::Expense, 10, "2025-01-05T00:00:00Z"));
        assert_eq!(ids(&latest(txs.clone(), 3)), vec![4, 5, 3]);
        assert_eq!(ids(&latest(txs, 10)).len(), 5);
    }
}
