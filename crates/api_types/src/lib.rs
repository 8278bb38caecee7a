//! Request and response bodies of the HTTP API.
//!
//! Request fields are optional on purpose: the server validates them and
//! answers with a readable 400 instead of a generic deserialization error.

use serde::{Deserialize, Serialize};

pub mod transaction {
    use super::*;
    use chrono::{DateTime, FixedOffset};

    /// Amount as posted by a client: a JSON number or a numeric string.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountInput {
        Number(f64),
        Text(String),
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub amount: Option<AmountInput>,
        pub category: Option<String>,
        /// RFC3339 timestamp, including timezone offset.
        pub date: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: u64,
        #[serde(rename = "type")]
        pub kind: String,
        pub amount: f64,
        pub category: String,
        pub date: DateTime<FixedOffset>,
    }

    /// Query string of the list endpoints. Values stay raw strings so that
    /// `month=null` and friends can be read as "no month filter".
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionQuery {
        pub year: Option<String>,
        pub month: Option<String>,
        pub limit: Option<usize>,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct CategoryLists {
        pub income: Vec<String>,
        pub expenses: Vec<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryNew {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub name: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryRename {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub old_name: Option<String>,
        pub new_name: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryDelete {
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryChanged {
        pub success: bool,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Summary {
        pub total_income: f64,
        pub total_expenses: f64,
        pub balance: f64,
        /// Human readable period, e.g. "January, 2024"; `None` for all time.
        pub period: Option<String>,
    }
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::category::CategoryRename;
    use super::transaction::{AmountInput, TransactionNew};

    #[test]
    fn transaction_new_reads_type_and_either_amount_shape() {
        let numeric: TransactionNew = serde_json::from_str(
            r#"{"type":"income","amount":12.5,"category":"Salary","date":"2024-01-05T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(numeric.kind.as_deref(), Some("income"));
        assert_eq!(numeric.amount, Some(AmountInput::Number(12.5)));

        let text: TransactionNew = serde_json::from_str(r#"{"amount":"12.50"}"#).unwrap();
        assert_eq!(text.amount, Some(AmountInput::Text("12.50".to_string())));
        assert!(text.kind.is_none());
    }

    #[test]
    fn rename_uses_camel_case_names() {
        let body: CategoryRename =
            serde_json::from_str(r#"{"type":"expense","oldName":"Food","newName":"Groceries"}"#)
                .unwrap();
        assert_eq!(body.old_name.as_deref(), Some("Food"));
        assert_eq!(body.new_name.as_deref(), Some("Groceries"));
    }
}
