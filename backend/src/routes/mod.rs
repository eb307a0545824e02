//! Route definitions for the Warehouse Inventory Management backend

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - material catalog (read-only)
        .nest("/materials", material_routes())
        // Protected routes - stock levels and mutations
        .nest("/stock", stock_routes())
        // Protected routes - movement/check logs
        .nest("/records", record_routes())
        // Protected routes - stock alerts
        .nest("/alerts", alert_routes())
        // Protected routes - reports
        .nest("/reports", report_routes())
}

/// Material catalog routes (protected)
fn material_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_materials))
        .route("/:material_id", get(handlers::get_material))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock level and mutation routes (protected)
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_stock))
        .route("/movements", post(handlers::record_movement))
        .route("/checks", post(handlers::record_check))
        .route("/:material_id", get(handlers::get_ledger))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Movement and check log routes (protected)
fn record_routes() -> Router<AppState> {
    Router::new()
        .route("/movements", get(handlers::list_movements))
        .route("/checks", get(handlers::list_checks))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Alert routes (protected)
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_alerts))
        .route("/:alert_id/resolve", post(handlers::resolve_alert))
        .route("/reconcile/:material_id", post(handlers::reconcile_material))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Report routes (protected)
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/monthly", get(handlers::monthly_report))
        .route_layer(middleware::from_fn(auth_middleware))
}
