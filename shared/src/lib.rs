//! Shared types and models for the Warehouse Inventory Management system
//!
//! This crate contains the domain types shared between the backend and other
//! components of the system, plus the pure stock and alert decision logic.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
