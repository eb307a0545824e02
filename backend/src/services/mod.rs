//! Business logic services for the Warehouse Inventory Management backend

pub mod alert;
pub mod catalog;
pub mod records;
pub mod reporting;
pub mod stock;

pub use alert::AlertService;
pub use catalog::CatalogService;
pub use records::RecordsService;
pub use reporting::ReportingService;
pub use stock::StockService;
