//! Stock alert models and threshold evaluation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the configured band a material's quantity has left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Quantity fell below the material's minimum
    Low,
    /// Quantity rose above the material's maximum
    High,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertType::Low => "low",
            AlertType::High => "high",
        }
    }

    /// Evaluate a quantity against a material's `[min, max]` band.
    ///
    /// Returns `None` when the quantity is inside the band (inclusive at both
    /// ends).
    pub fn for_quantity(quantity: i64, min_quantity: i64, max_quantity: i64) -> Option<AlertType> {
        if quantity < min_quantity {
            Some(AlertType::Low)
        } else if quantity > max_quantity {
            Some(AlertType::High)
        } else {
            None
        }
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(AlertType::Low),
            "high" => Ok(AlertType::High),
            other => Err(format!("unknown alert type: {}", other)),
        }
    }
}

/// A record flagging that a material's quantity left its configured band
///
/// For a given material at most one alert is unresolved at any time.
/// Reconciliation resolves stale alerts before inserting a fresh one;
/// operators may also resolve an alert manually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub material_id: Uuid,
    pub alert_type: AlertType,
    /// Ledger quantity at the moment the alert was generated
    pub current_quantity: i64,
    pub generated_time: DateTime<Utc>,
    pub is_resolved: bool,
}
