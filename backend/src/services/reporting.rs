//! Monthly stock summary reports
//!
//! Aggregates the movement log into per-material opening quantity, inbound
//! and outbound totals, and closing quantity for one calendar month.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Reporting service over the movement log
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// One material's totals for a report month
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MonthlyMaterialSummary {
    pub material_id: Uuid,
    pub material_name: String,
    pub unit: String,
    /// Signed movement total before the month began
    pub start_quantity: i64,
    pub inbound_quantity: i64,
    pub outbound_quantity: i64,
    pub end_quantity: i64,
}

impl ReportingService {
    /// Create a new ReportingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build the per-material summary for one calendar month
    pub async fn monthly_summary(
        &self,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<MonthlyMaterialSummary>> {
        let month_start = month_start(year, month)?;
        let month_end = next_month_start(year, month)?;

        let summaries = sqlx::query_as::<_, MonthlyMaterialSummary>(
            r#"
            SELECT m.id AS material_id, m.name AS material_name, m.unit,
                   CAST(COALESCE(opening.quantity, 0) AS BIGINT) AS start_quantity,
                   CAST(COALESCE(inbound.quantity, 0) AS BIGINT) AS inbound_quantity,
                   CAST(COALESCE(outbound.quantity, 0) AS BIGINT) AS outbound_quantity,
                   CAST(COALESCE(opening.quantity, 0) + COALESCE(inbound.quantity, 0)
                        - COALESCE(outbound.quantity, 0) AS BIGINT) AS end_quantity
            FROM materials m
            LEFT JOIN (
                SELECT material_id, SUM(quantity) AS quantity
                FROM movement_records
                WHERE kind = 'inbound' AND created_at >= $1 AND created_at < $2
                GROUP BY material_id
            ) inbound ON inbound.material_id = m.id
            LEFT JOIN (
                SELECT material_id, SUM(quantity) AS quantity
                FROM movement_records
                WHERE kind = 'outbound' AND created_at >= $1 AND created_at < $2
                GROUP BY material_id
            ) outbound ON outbound.material_id = m.id
            LEFT JOIN (
                SELECT material_id,
                       SUM(CASE WHEN kind = 'inbound' THEN quantity ELSE -quantity END) AS quantity
                FROM movement_records
                WHERE created_at < $1
                GROUP BY material_id
            ) opening ON opening.material_id = m.id
            ORDER BY m.name
            "#,
        )
        .bind(month_start)
        .bind(month_end)
        .fetch_all(&self.db)
        .await?;

        Ok(summaries)
    }
}

fn month_start(year: i32, month: u32) -> AppResult<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
        .ok_or_else(|| AppError::Validation {
            field: "month".to_string(),
            message: "Invalid report month".to_string(),
            message_zh: "无效的报表月份".to_string(),
        })
}

fn next_month_start(year: i32, month: u32) -> AppResult<DateTime<Utc>> {
    if month == 12 {
        month_start(year + 1, 1)
    } else {
        month_start(year, month + 1)
    }
}
