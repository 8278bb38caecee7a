//! Transactions API endpoints

use api_types::transaction::{AmountInput, TransactionNew, TransactionQuery, TransactionView};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, FixedOffset};
use engine::{Amount, NewTransaction, PeriodFilter, latest as newest_first};

use crate::{ServerError, parse_kind, required, server::ServerState};

/// How many rows `GET /transactions/latest` returns without a `limit`.
const DEFAULT_LATEST_LIMIT: usize = 5;

pub(crate) fn map_transaction(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: tx.kind.as_str().to_string(),
        amount: tx.amount.as_f64(),
        category: tx.category,
        date: tx.date,
    }
}

fn parse_amount(value: AmountInput) -> Result<Amount, ServerError> {
    let amount = match value {
        AmountInput::Number(value) => Amount::try_from_f64(value)?,
        AmountInput::Text(value) => value.trim().parse()?,
    };
    Ok(amount)
}

fn parse_date(value: &str) -> Result<DateTime<FixedOffset>, ServerError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map_err(|_| ServerError::Generic(format!("invalid date: {value}")))
}

/// Validate the raw body into an engine request.
fn parse_new(payload: TransactionNew) -> Result<NewTransaction, ServerError> {
    let kind = parse_kind(payload.kind)?;
    let amount = parse_amount(required(payload.amount, "amount")?)?;
    let category = required(payload.category, "category")?;
    let date = parse_date(&required(payload.date, "date")?)?;

    Ok(NewTransaction {
        kind,
        amount,
        category,
        date,
    })
}

pub(crate) fn parse_filter(query: &TransactionQuery) -> PeriodFilter {
    PeriodFilter::from_query(query.year.as_deref(), query.month.as_deref())
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TransactionQuery>,
) -> Json<Vec<TransactionView>> {
    let filter = parse_filter(&query);
    let engine = state.engine.read().await;

    let txs = engine
        .select(filter)
        .into_iter()
        .map(map_transaction)
        .collect();
    Json(txs)
}

pub async fn latest(
    State(state): State<ServerState>,
    Query(query): Query<TransactionQuery>,
) -> Json<Vec<TransactionView>> {
    let filter = parse_filter(&query);
    let limit = query.limit.unwrap_or(DEFAULT_LATEST_LIMIT);
    let engine = state.engine.read().await;

    let txs = newest_first(engine.select(filter), limit)
        .into_iter()
        .map(map_transaction)
        .collect();
    Json(txs)
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let new = parse_new(payload)?;
    let tx = state
        .mutate(move |engine| engine.add_transaction(new))
        .await?;

    Ok((StatusCode::CREATED, Json(map_transaction(tx))))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ServerError> {
    if state
        .mutate(move |engine| engine.delete_transaction(id))
        .await?
    {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::Engine(engine::EngineError::NotFound(format!(
            "transaction {id}"
        ))))
    }
}
