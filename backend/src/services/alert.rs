//! Alert reconciliation service
//!
//! Keeps the alert table consistent with the inventory ledger for one
//! material at a time. Reconciliation always resolves every unresolved alert
//! for the material before evaluating the current quantity against the
//! material's band, so at most one unresolved alert can exist per material
//! and every alert row keeps the quantity that triggered it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Alert, AlertType};

/// Alert service for reconciliation and operator acknowledgement
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
}

/// Alert row joined with its material name for list views
#[derive(Debug, Clone, Serialize)]
pub struct AlertView {
    pub id: Uuid,
    pub material_id: Uuid,
    pub material_name: String,
    pub alert_type: AlertType,
    pub current_quantity: i64,
    pub generated_time: DateTime<Utc>,
    pub is_resolved: bool,
}

/// Raw alert row; alert_type is parsed after fetching
#[derive(Debug, FromRow)]
struct AlertRow {
    id: Uuid,
    material_id: Uuid,
    alert_type: String,
    current_quantity: i64,
    generated_time: DateTime<Utc>,
    is_resolved: bool,
}

#[derive(Debug, FromRow)]
struct AlertViewRow {
    id: Uuid,
    material_id: Uuid,
    material_name: String,
    alert_type: String,
    current_quantity: i64,
    generated_time: DateTime<Utc>,
    is_resolved: bool,
}

impl AlertRow {
    fn into_alert(self) -> AppResult<Alert> {
        let alert_type = parse_alert_type(&self.alert_type)?;
        Ok(Alert {
            id: self.id,
            material_id: self.material_id,
            alert_type,
            current_quantity: self.current_quantity,
            generated_time: self.generated_time,
            is_resolved: self.is_resolved,
        })
    }
}

fn parse_alert_type(raw: &str) -> AppResult<AlertType> {
    raw.parse::<AlertType>()
        .map_err(|msg| AppError::InternalError(anyhow::anyhow!(msg)))
}

impl AlertService {
    /// Create a new AlertService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Recompute the alert state for one material from the current ledger
    /// quantity and the material's thresholds.
    ///
    /// Runs as its own transaction, separate from the stock mutation that
    /// triggered it. Idempotent: repeating the call with unchanged inputs
    /// re-derives the same unresolved-alert state.
    pub async fn reconcile(&self, material_id: Uuid) -> AppResult<Option<Alert>> {
        let mut tx = self.db.begin().await?;

        // Current quantity and thresholds in one read. A material with no
        // ledger row cannot be in alert.
        let thresholds = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT l.current_quantity, m.min_quantity, m.max_quantity
            FROM inventory_ledger l
            JOIN materials m ON l.material_id = m.id
            WHERE l.material_id = $1
            "#,
        )
        .bind(material_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((current_quantity, min_quantity, max_quantity)) = thresholds else {
            return Ok(None);
        };

        // Resolve stale alerts unconditionally before evaluating the new
        // state; the evaluation below re-creates one when still warranted.
        sqlx::query(
            "UPDATE alerts SET is_resolved = TRUE WHERE material_id = $1 AND is_resolved = FALSE",
        )
        .bind(material_id)
        .execute(&mut *tx)
        .await?;

        let alert = match AlertType::for_quantity(current_quantity, min_quantity, max_quantity) {
            None => None,
            Some(alert_type) => {
                let row = sqlx::query_as::<_, AlertRow>(
                    r#"
                    INSERT INTO alerts (material_id, alert_type, current_quantity)
                    VALUES ($1, $2, $3)
                    RETURNING id, material_id, alert_type, current_quantity,
                              generated_time, is_resolved
                    "#,
                )
                .bind(material_id)
                .bind(alert_type.as_str())
                .bind(current_quantity)
                .fetch_one(&mut *tx)
                .await?;

                Some(row.into_alert()?)
            }
        };

        tx.commit().await?;

        Ok(alert)
    }

    /// Mark a single alert as resolved by id (operator acknowledgement)
    ///
    /// Flips the flag only; the ledger is untouched.
    pub async fn mark_resolved(&self, alert_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE alerts SET is_resolved = TRUE WHERE id = $1")
            .bind(alert_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Alert".to_string()));
        }

        Ok(())
    }

    /// List alerts with their material names, newest first
    pub async fn list_alerts(&self, include_resolved: bool) -> AppResult<Vec<AlertView>> {
        let rows = if include_resolved {
            sqlx::query_as::<_, AlertViewRow>(
                r#"
                SELECT a.id, a.material_id, m.name AS material_name, a.alert_type,
                       a.current_quantity, a.generated_time, a.is_resolved
                FROM alerts a
                JOIN materials m ON a.material_id = m.id
                ORDER BY a.generated_time DESC
                "#,
            )
            .fetch_all(&self.db)
            .await?
        } else {
            sqlx::query_as::<_, AlertViewRow>(
                r#"
                SELECT a.id, a.material_id, m.name AS material_name, a.alert_type,
                       a.current_quantity, a.generated_time, a.is_resolved
                FROM alerts a
                JOIN materials m ON a.material_id = m.id
                WHERE a.is_resolved = FALSE
                ORDER BY a.generated_time DESC
                "#,
            )
            .fetch_all(&self.db)
            .await?
        };

        rows.into_iter()
            .map(|row| {
                let alert_type = parse_alert_type(&row.alert_type)?;
                Ok(AlertView {
                    id: row.id,
                    material_id: row.material_id,
                    material_name: row.material_name,
                    alert_type,
                    current_quantity: row.current_quantity,
                    generated_time: row.generated_time,
                    is_resolved: row.is_resolved,
                })
            })
            .collect()
    }
}
