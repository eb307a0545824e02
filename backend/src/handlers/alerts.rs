//! HTTP handlers for stock alert endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Alert;
use crate::services::alert::{AlertService, AlertView};
use crate::AppState;

/// Query parameters for the alert list
#[derive(Debug, Deserialize)]
pub struct AlertListQuery {
    pub include_resolved: Option<bool>,
}

/// Response for an on-demand reconciliation
#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    /// The freshly generated alert, when the quantity is outside the band
    pub alert: Option<Alert>,
}

/// List alerts, optionally including resolved ones
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertListQuery>,
) -> AppResult<Json<Vec<AlertView>>> {
    let service = AlertService::new(state.db);
    let alerts = service
        .list_alerts(query.include_resolved.unwrap_or(false))
        .await?;
    Ok(Json(alerts))
}

/// Mark one alert as resolved (operator acknowledgement)
pub async fn resolve_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = AlertService::new(state.db);
    service.mark_resolved(alert_id).await?;
    Ok(Json(()))
}

/// Re-run alert reconciliation for one material
pub async fn reconcile_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<ReconcileResponse>> {
    let service = AlertService::new(state.db);
    let alert = service.reconcile(material_id).await?;
    Ok(Json(ReconcileResponse { alert }))
}
