//! HTTP handlers for the Warehouse Inventory Management backend

pub mod alerts;
pub mod health;
pub mod materials;
pub mod records;
pub mod reports;
pub mod stock;

pub use alerts::*;
pub use health::*;
pub use materials::*;
pub use records::*;
pub use reports::*;
pub use stock::*;
