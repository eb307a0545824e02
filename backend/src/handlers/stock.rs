//! HTTP handlers for stock mutation endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::LedgerEntry;
use crate::services::stock::{
    CheckOutcome, MovementOutcome, RecordCheckInput, RecordMovementInput, StockLevel, StockService,
};
use crate::AppState;

/// Query parameters for the stock list
#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub search: Option<String>,
}

/// Record an inbound or outbound movement
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<Json<MovementOutcome>> {
    let service = StockService::new(state.db);
    let outcome = service
        .apply_movement(current_user.0.user_id, input)
        .await?;
    Ok(Json(outcome))
}

/// Record a physical-count check
pub async fn record_check(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordCheckInput>,
) -> AppResult<Json<CheckOutcome>> {
    let service = StockService::new(state.db);
    let outcome = service.apply_check(current_user.0.user_id, input).await?;
    Ok(Json(outcome))
}

/// List current stock levels
pub async fn list_stock(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> AppResult<Json<Vec<StockLevel>>> {
    let service = StockService::new(state.db);
    let levels = service.list_stock(query.search.as_deref()).await?;
    Ok(Json(levels))
}

/// Get the ledger entry for one material
pub async fn get_ledger(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<LedgerEntry>> {
    let service = StockService::new(state.db);
    let entry = service.get_ledger(material_id).await?;
    Ok(Json(entry))
}
