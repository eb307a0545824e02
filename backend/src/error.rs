//! Error handling for the Warehouse Inventory Management backend
//!
//! Provides consistent error responses in English and Chinese

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::StockError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Stock mutation errors
    #[error("Material not found")]
    MaterialNotFound,

    #[error("No stock record exists for this material")]
    NoStockRecord,

    #[error("Insufficient stock: {available} on hand, {requested} requested")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_zh: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::NonPositiveQuantity | StockError::NegativeQuantity => {
                AppError::InvalidQuantity(err.to_string())
            }
            StockError::NoStockRecord => AppError::NoStockRecord,
            StockError::InsufficientStock {
                available,
                requested,
            } => AppError::InsufficientStock {
                available,
                requested,
            },
            StockError::UnknownMovementKind(kind) => AppError::Validation {
                field: "kind".to_string(),
                message: format!("Unknown movement kind: {}", kind),
                message_zh: format!("未知的操作类型：{}", kind),
            },
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_zh: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::MaterialNotFound => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "MATERIAL_NOT_FOUND".to_string(),
                    message_en: "Material not found".to_string(),
                    message_zh: "未找到该物料".to_string(),
                    field: None,
                },
            ),
            AppError::NoStockRecord => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "NO_STOCK_RECORD".to_string(),
                    message_en: "This material has no stock record yet".to_string(),
                    message_zh: "该物料尚无库存记录".to_string(),
                    field: None,
                },
            ),
            AppError::InsufficientStock {
                available,
                requested,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message_en: format!(
                        "Insufficient stock: {} on hand, {} requested",
                        available, requested
                    ),
                    message_zh: "库存不足，无法出库".to_string(),
                    field: None,
                },
            ),
            AppError::InvalidQuantity(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_QUANTITY".to_string(),
                    message_en: msg.clone(),
                    message_zh: "请输入有效的数量".to_string(),
                    field: Some("quantity".to_string()),
                },
            ),
            AppError::Validation {
                field,
                message,
                message_zh,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_zh: message_zh.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message_en: format!("{} not found", resource),
                    message_zh: format!("未找到 {}", resource),
                    field: None,
                },
            ),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "DATABASE_ERROR".to_string(),
                    message_en: "A database error occurred".to_string(),
                    message_zh: "数据库错误".to_string(),
                    field: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message_en: "An internal server error occurred".to_string(),
                    message_zh: "服务器内部错误".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
