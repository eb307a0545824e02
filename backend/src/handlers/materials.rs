//! HTTP handlers for material catalog endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::Material;
use crate::services::catalog::CatalogService;
use crate::AppState;

/// Query parameters for the material list
#[derive(Debug, Deserialize)]
pub struct MaterialQuery {
    pub search: Option<String>,
}

/// List materials, optionally filtered by a name or supplier keyword
pub async fn list_materials(
    State(state): State<AppState>,
    Query(query): Query<MaterialQuery>,
) -> AppResult<Json<Vec<Material>>> {
    let service = CatalogService::new(state.db);
    let materials = service.list_materials(query.search.as_deref()).await?;
    Ok(Json(materials))
}

/// Get a single material by id
pub async fn get_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> AppResult<Json<Material>> {
    let service = CatalogService::new(state.db);
    let material = service.get_material(material_id).await?;
    Ok(Json(material))
}
