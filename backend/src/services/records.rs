//! Movement and check log queries
//!
//! Read-only views over the append-only audit tables, joined with material
//! names and usernames for display.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::MovementKind;

/// Query service over movement and check records
#[derive(Clone)]
pub struct RecordsService {
    db: PgPool,
}

/// Optional filters for the movement log
#[derive(Debug, Default, Deserialize)]
pub struct MovementFilter {
    /// Inclusive first day of the range
    pub start_date: Option<NaiveDate>,
    /// Inclusive last day of the range
    pub end_date: Option<NaiveDate>,
    pub kind: Option<MovementKind>,
    /// Keyword matched against material names
    pub material: Option<String>,
    /// Keyword matched against usernames
    pub username: Option<String>,
}

/// A movement record joined with material and user names
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MovementRecordView {
    pub id: Uuid,
    pub kind: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub material_name: String,
    pub username: String,
    pub note: Option<String>,
}

/// A check record joined with material and adjuster names
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CheckRecordView {
    pub id: Uuid,
    pub material_name: String,
    pub real_quantity: i64,
    pub recorded_quantity: i64,
    pub username: String,
    pub checked_at: DateTime<Utc>,
}

impl RecordsService {
    /// Create a new RecordsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List movement records, newest first, applying any combination of the
    /// optional filters
    pub async fn list_movements(
        &self,
        filter: &MovementFilter,
    ) -> AppResult<Vec<MovementRecordView>> {
        let start = filter.start_date.map(day_start);
        // The end date is inclusive; compare against the start of the next day
        let end = filter
            .end_date
            .and_then(|d| d.checked_add_days(Days::new(1)))
            .map(day_start);

        let records = sqlx::query_as::<_, MovementRecordView>(
            r#"
            SELECT r.id, r.kind, r.quantity, r.created_at,
                   m.name AS material_name, u.username, r.note
            FROM movement_records r
            JOIN materials m ON r.material_id = m.id
            JOIN users u ON r.user_id = u.id
            WHERE ($1::timestamptz IS NULL OR r.created_at >= $1)
              AND ($2::timestamptz IS NULL OR r.created_at < $2)
              AND ($3::text IS NULL OR r.kind = $3)
              AND ($4::text IS NULL OR m.name ILIKE '%' || $4 || '%')
              AND ($5::text IS NULL OR u.username ILIKE '%' || $5 || '%')
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(filter.kind.map(|k| k.as_str()))
        .bind(filter.material.as_deref().filter(|s| !s.is_empty()))
        .bind(filter.username.as_deref().filter(|s| !s.is_empty()))
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }

    /// List check records, newest first, optionally filtered by a material
    /// name keyword
    pub async fn list_checks(&self, search: Option<&str>) -> AppResult<Vec<CheckRecordView>> {
        let records = sqlx::query_as::<_, CheckRecordView>(
            r#"
            SELECT c.id, m.name AS material_name, c.real_quantity,
                   c.recorded_quantity, u.username, c.checked_at
            FROM check_records c
            JOIN materials m ON c.material_id = m.id
            JOIN users u ON c.adjusted_by_user = u.id
            WHERE ($1::text IS NULL OR m.name ILIKE '%' || $1 || '%')
            ORDER BY c.checked_at DESC
            "#,
        )
        .bind(search.filter(|s| !s.is_empty()))
        .fetch_all(&self.db)
        .await?;

        Ok(records)
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
