//! Statistics API endpoints

use api_types::{stats::Summary, transaction::TransactionQuery};
use axum::{
    Json,
    extract::{Query, State},
};
use engine::{AvailableDates, summarize};

use crate::{server::ServerState, transactions::parse_filter};

/// Handle requests for the income/expense totals of a period
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<TransactionQuery>,
) -> Json<Summary> {
    let filter = parse_filter(&query);
    let totals = summarize(&state.engine.read().await.select(filter));

    Json(Summary {
        total_income: totals.total_income.as_f64(),
        total_expenses: totals.total_expenses.as_f64(),
        balance: totals.balance.as_f64(),
        period: filter.period().map(|p| p.to_string()),
    })
}

/// Years and months that hold at least one transaction
pub async fn available_dates(State(state): State<ServerState>) -> Json<AvailableDates> {
    Json(state.engine.read().await.available_dates())
}
