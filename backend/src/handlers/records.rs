//! HTTP handlers for movement and check log endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::records::{CheckRecordView, MovementFilter, MovementRecordView, RecordsService};
use crate::AppState;

/// Query parameters for the check log
#[derive(Debug, Deserialize)]
pub struct CheckLogQuery {
    pub search: Option<String>,
}

/// List movement records with optional date-range, kind and keyword filters
pub async fn list_movements(
    State(state): State<AppState>,
    Query(filter): Query<MovementFilter>,
) -> AppResult<Json<Vec<MovementRecordView>>> {
    let service = RecordsService::new(state.db);
    let records = service.list_movements(&filter).await?;
    Ok(Json(records))
}

/// List check records, optionally filtered by a material name keyword
pub async fn list_checks(
    State(state): State<AppState>,
    Query(query): Query<CheckLogQuery>,
) -> AppResult<Json<Vec<CheckRecordView>>> {
    let service = RecordsService::new(state.db);
    let records = service.list_checks(query.search.as_deref()).await?;
    Ok(Json(records))
}
