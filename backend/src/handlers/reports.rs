//! HTTP handlers for reporting endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use shared::validation::parse_month;

use crate::error::{AppError, AppResult};
use crate::services::reporting::{MonthlyMaterialSummary, ReportingService};
use crate::AppState;

/// Query parameters for the monthly report
#[derive(Debug, Deserialize)]
pub struct MonthlyReportQuery {
    /// Report month in `YYYY-MM` form
    pub month: String,
}

/// Build the monthly per-material stock summary
pub async fn monthly_report(
    State(state): State<AppState>,
    Query(query): Query<MonthlyReportQuery>,
) -> AppResult<Json<Vec<MonthlyMaterialSummary>>> {
    let (year, month) = parse_month(&query.month).map_err(|msg| AppError::Validation {
        field: "month".to_string(),
        message: msg.to_string(),
        message_zh: "月份格式应为 YYYY-MM".to_string(),
    })?;

    let service = ReportingService::new(state.db);
    let summaries = service.monthly_summary(year, month).await?;
    Ok(Json(summaries))
}
