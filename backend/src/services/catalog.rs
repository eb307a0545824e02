//! Material catalog lookups
//!
//! Read-only access to the material reference data. Catalog management
//! (creating and editing materials) happens outside this service.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Material;

/// Catalog service for material lookups
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct MaterialRow {
    id: Uuid,
    name: String,
    supplier: String,
    unit: String,
    min_quantity: i64,
    max_quantity: i64,
    note: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MaterialRow> for Material {
    fn from(row: MaterialRow) -> Self {
        Material {
            id: row.id,
            name: row.name,
            supplier: row.supplier,
            unit: row.unit,
            min_quantity: row.min_quantity,
            max_quantity: row.max_quantity,
            note: row.note,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const MATERIAL_COLUMNS: &str = "id, name, supplier, unit, min_quantity, max_quantity, note, \
                                created_at, updated_at";

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List materials, optionally filtered by a keyword matching name or
    /// supplier
    pub async fn list_materials(&self, search: Option<&str>) -> AppResult<Vec<Material>> {
        let rows = match search {
            Some(keyword) if !keyword.is_empty() => {
                sqlx::query_as::<_, MaterialRow>(&format!(
                    "SELECT {} FROM materials \
                     WHERE name ILIKE '%' || $1 || '%' OR supplier ILIKE '%' || $1 || '%' \
                     ORDER BY name",
                    MATERIAL_COLUMNS
                ))
                .bind(keyword)
                .fetch_all(&self.db)
                .await?
            }
            _ => {
                sqlx::query_as::<_, MaterialRow>(&format!(
                    "SELECT {} FROM materials ORDER BY name",
                    MATERIAL_COLUMNS
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(Material::from).collect())
    }

    /// Get a single material by id
    pub async fn get_material(&self, material_id: Uuid) -> AppResult<Material> {
        let row = sqlx::query_as::<_, MaterialRow>(&format!(
            "SELECT {} FROM materials WHERE id = $1",
            MATERIAL_COLUMNS
        ))
        .bind(material_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::MaterialNotFound)?;

        Ok(row.into())
    }
}
