//! Stock mutation service
//!
//! The single code path for every change to a material's on-hand quantity:
//! inbound/outbound movements and physical-count adjustments. Each mutation
//! updates the ledger and appends its audit record inside one transaction,
//! locking the ledger row so concurrent mutations of the same material are
//! serialized. Alert reconciliation runs after the commit and never undoes
//! an applied mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use shared::validation::validate_note;

use crate::error::{AppError, AppResult};
use crate::models::{
    validate_counted_quantity, CheckRecord, LedgerEntry, MovementKind, MovementRecord,
};
use crate::services::alert::AlertService;

/// Stock service applying movements and checks to the inventory ledger
#[derive(Clone)]
pub struct StockService {
    db: PgPool,
}

/// Input for recording an inbound or outbound movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub material_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i64,
    pub note: Option<String>,
}

/// Input for recording a physical-count check
#[derive(Debug, Deserialize)]
pub struct RecordCheckInput {
    pub material_id: Uuid,
    /// Physically counted quantity; replaces the ledger value
    pub real_quantity: i64,
}

/// Result of an accepted movement
#[derive(Debug, Clone, Serialize)]
pub struct MovementOutcome {
    pub record: MovementRecord,
    pub new_quantity: i64,
}

/// Result of an accepted check
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutcome {
    pub record: CheckRecord,
    pub new_quantity: i64,
}

/// Current stock level joined with catalog data for list views
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StockLevel {
    pub material_id: Uuid,
    pub material_name: String,
    pub supplier: String,
    pub unit: String,
    pub current_quantity: i64,
    pub last_updated: DateTime<Utc>,
}

impl StockService {
    /// Create a new StockService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply one inbound or outbound movement to a material's ledger
    ///
    /// An inbound movement on a material without a ledger row initializes the
    /// row at the moved quantity; an outbound movement on a missing row fails
    /// with `NoStockRecord`. Returns the outcome with the new quantity.
    pub async fn apply_movement(
        &self,
        user_id: Uuid,
        input: RecordMovementInput,
    ) -> AppResult<MovementOutcome> {
        if input.quantity <= 0 {
            return Err(AppError::InvalidQuantity(
                "Quantity must be a positive integer".to_string(),
            ));
        }

        if let Some(note) = &input.note {
            validate_note(note).map_err(|msg| AppError::Validation {
                field: "note".to_string(),
                message: msg.to_string(),
                message_zh: "备注过长".to_string(),
            })?;
        }

        self.ensure_material_exists(input.material_id).await?;

        let mut tx = self.db.begin().await?;

        let current = fetch_ledger_for_update(&mut tx, input.material_id).await?;
        let new_quantity = input.kind.apply(current, input.quantity)?;

        upsert_ledger(&mut tx, input.material_id, new_quantity).await?;
        let record = append_movement(
            &mut tx,
            input.material_id,
            user_id,
            input.kind,
            input.quantity,
            input.note,
        )
        .await?;

        tx.commit().await?;

        // The movement is committed and authoritative at this point; a
        // reconciliation failure must not surface as a movement failure.
        self.reconcile_best_effort(input.material_id).await;

        Ok(MovementOutcome {
            record,
            new_quantity,
        })
    }

    /// Apply a physical-count adjustment, setting the ledger to the counted
    /// value
    ///
    /// A check cannot initialize stock: a material without a ledger row fails
    /// with `NoStockRecord`. The ledger value at count time is preserved on
    /// the check record.
    pub async fn apply_check(
        &self,
        user_id: Uuid,
        input: RecordCheckInput,
    ) -> AppResult<CheckOutcome> {
        validate_counted_quantity(input.real_quantity)?;

        self.ensure_material_exists(input.material_id).await?;

        let mut tx = self.db.begin().await?;

        let recorded_quantity = fetch_ledger_for_update(&mut tx, input.material_id)
            .await?
            .ok_or(AppError::NoStockRecord)?;

        upsert_ledger(&mut tx, input.material_id, input.real_quantity).await?;
        let record = append_check(
            &mut tx,
            input.material_id,
            input.real_quantity,
            recorded_quantity,
            user_id,
        )
        .await?;

        tx.commit().await?;

        self.reconcile_best_effort(input.material_id).await;

        Ok(CheckOutcome {
            record,
            new_quantity: input.real_quantity,
        })
    }

    /// Read the ledger entry for one material
    pub async fn get_ledger(&self, material_id: Uuid) -> AppResult<LedgerEntry> {
        self.ensure_material_exists(material_id).await?;

        let entry = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            "SELECT current_quantity, last_updated FROM inventory_ledger WHERE material_id = $1",
        )
        .bind(material_id)
        .fetch_optional(&self.db)
        .await?
        .map(|(current_quantity, last_updated)| LedgerEntry {
            material_id,
            current_quantity,
            last_updated,
        })
        .ok_or(AppError::NoStockRecord)?;

        Ok(entry)
    }

    /// List current stock levels, optionally filtered by a keyword matching
    /// material name or supplier
    pub async fn list_stock(&self, search: Option<&str>) -> AppResult<Vec<StockLevel>> {
        let levels = match search {
            Some(keyword) if !keyword.is_empty() => {
                sqlx::query_as::<_, StockLevel>(
                    r#"
                    SELECT m.id AS material_id, m.name AS material_name, m.supplier,
                           m.unit, l.current_quantity, l.last_updated
                    FROM inventory_ledger l
                    JOIN materials m ON l.material_id = m.id
                    WHERE m.name ILIKE '%' || $1 || '%' OR m.supplier ILIKE '%' || $1 || '%'
                    ORDER BY m.name
                    "#,
                )
                .bind(keyword)
                .fetch_all(&self.db)
                .await?
            }
            _ => {
                sqlx::query_as::<_, StockLevel>(
                    r#"
                    SELECT m.id AS material_id, m.name AS material_name, m.supplier,
                           m.unit, l.current_quantity, l.last_updated
                    FROM inventory_ledger l
                    JOIN materials m ON l.material_id = m.id
                    ORDER BY m.name
                    "#,
                )
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(levels)
    }

    async fn ensure_material_exists(&self, material_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM materials WHERE id = $1)")
                .bind(material_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::MaterialNotFound);
        }

        Ok(())
    }

    async fn reconcile_best_effort(&self, material_id: Uuid) {
        if let Err(err) = AlertService::new(self.db.clone()).reconcile(material_id).await {
            tracing::warn!(
                material_id = %material_id,
                error = %err,
                "alert reconciliation failed after committed stock mutation"
            );
        }
    }
}

/// Read a material's ledger quantity, locking the row for the transaction
///
/// The lock serializes concurrent mutations of the same material; movements
/// against different materials do not contend.
async fn fetch_ledger_for_update(
    conn: &mut PgConnection,
    material_id: Uuid,
) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT current_quantity FROM inventory_ledger WHERE material_id = $1 FOR UPDATE",
    )
    .bind(material_id)
    .fetch_optional(conn)
    .await
}

/// Insert or update the single ledger row for a material
async fn upsert_ledger(
    conn: &mut PgConnection,
    material_id: Uuid,
    quantity: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO inventory_ledger (material_id, current_quantity, last_updated)
        VALUES ($1, $2, NOW())
        ON CONFLICT (material_id)
        DO UPDATE SET current_quantity = EXCLUDED.current_quantity, last_updated = NOW()
        "#,
    )
    .bind(material_id)
    .bind(quantity)
    .execute(conn)
    .await?;

    Ok(())
}

/// Append one movement record, returning the stored row
async fn append_movement(
    conn: &mut PgConnection,
    material_id: Uuid,
    user_id: Uuid,
    kind: MovementKind,
    quantity: i64,
    note: Option<String>,
) -> Result<MovementRecord, sqlx::Error> {
    let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
        r#"
        INSERT INTO movement_records (material_id, user_id, kind, quantity, note)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, created_at
        "#,
    )
    .bind(material_id)
    .bind(user_id)
    .bind(kind.as_str())
    .bind(quantity)
    .bind(&note)
    .fetch_one(conn)
    .await?;

    Ok(MovementRecord {
        id,
        material_id,
        user_id,
        kind,
        quantity,
        note,
        created_at,
    })
}

/// Append one check record, returning the stored row
async fn append_check(
    conn: &mut PgConnection,
    material_id: Uuid,
    real_quantity: i64,
    recorded_quantity: i64,
    adjusted_by_user: Uuid,
) -> Result<CheckRecord, sqlx::Error> {
    let (id, checked_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
        r#"
        INSERT INTO check_records (material_id, real_quantity, recorded_quantity, adjusted_by_user)
        VALUES ($1, $2, $3, $4)
        RETURNING id, checked_at
        "#,
    )
    .bind(material_id)
    .bind(real_quantity)
    .bind(recorded_quantity)
    .bind(adjusted_by_user)
    .fetch_one(conn)
    .await?;

    Ok(CheckRecord {
        id,
        material_id,
        real_quantity,
        recorded_quantity,
        adjusted_by_user,
        checked_at,
    })
}
