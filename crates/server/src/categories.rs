//! Category taxonomy endpoints

use api_types::category::{
    CategoryChanged, CategoryDelete, CategoryLists, CategoryNew, CategoryRename,
};
use axum::{Json, extract::State, http::StatusCode};
use engine::TransactionKind;

use crate::{ServerError, parse_kind, required, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Json<CategoryLists> {
    let engine = state.engine.read().await;
    let categories = engine.categories();

    Json(CategoryLists {
        income: categories.list(TransactionKind::Income).to_vec(),
        expenses: categories.list(TransactionKind::Expense).to_vec(),
    })
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryChanged>), ServerError> {
    let kind = parse_kind(payload.kind)?;
    let name = required(payload.name, "name")?;

    state
        .mutate(move |engine| engine.add_category(kind, &name))
        .await?;
    Ok((StatusCode::CREATED, Json(CategoryChanged { success: true })))
}

pub async fn rename(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryRename>,
) -> Result<Json<CategoryChanged>, ServerError> {
    let kind = parse_kind(payload.kind)?;
    let old_name = required(payload.old_name, "oldName")?;
    let new_name = required(payload.new_name, "newName")?;

    state
        .mutate(move |engine| engine.rename_category(kind, &old_name, &new_name))
        .await?;
    Ok(Json(CategoryChanged { success: true }))
}

pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryDelete>,
) -> Result<StatusCode, ServerError> {
    let kind = parse_kind(payload.kind)?;
    let name = required(payload.name, "name")?;

    state
        .mutate(move |engine| engine.delete_category(kind, &name))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
