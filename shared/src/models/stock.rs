//! Inventory ledger and stock movement models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    Inbound,
    Outbound,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Inbound => "inbound",
            MovementKind::Outbound => "outbound",
        }
    }

    /// Apply a movement of `quantity` to the on-hand quantity for a material.
    ///
    /// `current` is `None` when the material has no ledger row yet: an inbound
    /// movement initializes the ledger at `quantity`, an outbound movement is
    /// rejected. Outbound movements larger than the on-hand quantity are
    /// rejected rather than driving the ledger negative.
    pub fn apply(&self, current: Option<i64>, quantity: i64) -> Result<i64, StockError> {
        if quantity <= 0 {
            return Err(StockError::NonPositiveQuantity);
        }

        match (self, current) {
            (MovementKind::Inbound, None) => Ok(quantity),
            (MovementKind::Inbound, Some(on_hand)) => Ok(on_hand + quantity),
            (MovementKind::Outbound, None) => Err(StockError::NoStockRecord),
            (MovementKind::Outbound, Some(on_hand)) => {
                if quantity > on_hand {
                    Err(StockError::InsufficientStock {
                        available: on_hand,
                        requested: quantity,
                    })
                } else {
                    Ok(on_hand - quantity)
                }
            }
        }
    }
}

impl std::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MovementKind {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inbound" => Ok(MovementKind::Inbound),
            "outbound" => Ok(MovementKind::Outbound),
            other => Err(StockError::UnknownMovementKind(other.to_string())),
        }
    }
}

/// Reasons a stock mutation can be refused before touching the database
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("quantity must be a positive integer")]
    NonPositiveQuantity,

    #[error("counted quantity cannot be negative")]
    NegativeQuantity,

    #[error("no stock record exists for this material")]
    NoStockRecord,

    #[error("insufficient stock: {available} on hand, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("unknown movement kind: {0}")]
    UnknownMovementKind(String),
}

/// Current on-hand quantity for one material
///
/// At most one ledger entry exists per material; the quantity never goes
/// negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub material_id: Uuid,
    pub current_quantity: i64,
    pub last_updated: DateTime<Utc>,
}

/// An inbound or outbound transaction, recorded once per accepted mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementRecord {
    pub id: Uuid,
    pub material_id: Uuid,
    pub user_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A physical-count correction
///
/// Moves the ledger to the counted value and preserves the system value at
/// the time of the count for auditing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub id: Uuid,
    pub material_id: Uuid,
    /// Physically counted quantity
    pub real_quantity: i64,
    /// Ledger quantity at the time of the count
    pub recorded_quantity: i64,
    pub adjusted_by_user: Uuid,
    pub checked_at: DateTime<Utc>,
}

/// Validate the counted value of a physical check
///
/// A count may set stock to any non-negative value, including zero.
pub fn validate_counted_quantity(real_quantity: i64) -> Result<(), StockError> {
    if real_quantity < 0 {
        return Err(StockError::NegativeQuantity);
    }
    Ok(())
}
