//! Material catalog models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A material in the warehouse catalog
///
/// Reference data: created and edited by catalog management, referenced by
/// ledger rows, movement records and alerts via `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub supplier: String,
    /// Unit of measure (e.g. "pcs", "box", "kg")
    pub unit: String,
    /// Lower bound of the acceptable stock band
    pub min_quantity: i64,
    /// Upper bound of the acceptable stock band
    pub max_quantity: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
