//! Database models for the Warehouse Inventory Management backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
