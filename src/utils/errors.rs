//! Sistema de manejo de errores
//!
//! Este módulo define la taxonomía de errores de la flota
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already processed: {0}")]
    AlreadyProcessed(String),

    #[error("Duplicate plate: {0}")]
    DuplicatePlate(String),

    #[error("Vehicle unavailable: {0}")]
    VehicleUnavailable(String),

    #[error("Invalid odometer: end {end} is lower than start {start}")]
    InvalidOdometer { start: i64, end: i64 },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Código estable expuesto al cliente
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::AlreadyProcessed(_) => "ALREADY_PROCESSED",
            AppError::DuplicatePlate(_) => "DUPLICATE_PLATE",
            AppError::VehicleUnavailable(_) => "VEHICLE_UNAVAILABLE",
            AppError::InvalidOdometer { .. } => "INVALID_ODOMETER",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Database(_) => "DB_ERROR",
            AppError::Jwt(_) => "JWT_ERROR",
            AppError::Hash(_) => "HASH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyProcessed(_)
            | AppError::DuplicatePlate(_)
            | AppError::VehicleUnavailable(_) => StatusCode::CONFLICT,
            AppError::InvalidOdometer { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Hash(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code().to_string();

        let error_response = match self {
            AppError::Database(e) => {
                tracing::error!("❌ Error de base de datos: {}", e);
                ErrorResponse {
                    error: "Database Error".to_string(),
                    message: "An error occurred while accessing the database".to_string(),
                    details: Some(json!({ "sql_error": e.to_string() })),
                    code,
                }
            }

            AppError::Validation(e) => {
                tracing::warn!("⚠️ Error de validación: {}", e);
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code,
                }
            }

            AppError::InvalidOdometer { start, end } => {
                tracing::warn!("⚠️ Odómetro inválido: final {} < inicial {}", end, start);
                ErrorResponse {
                    error: "Invalid Odometer".to_string(),
                    message: "El odómetro final no puede ser menor que el inicial.".to_string(),
                    details: Some(json!({ "start_odometer": start, "end_odometer": end })),
                    code,
                }
            }

            AppError::Hash(msg) => {
                tracing::error!("❌ Error de hash: {}", msg);
                ErrorResponse {
                    error: "Hash Error".to_string(),
                    message: "An error occurred while processing credentials".to_string(),
                    details: Some(json!({ "hash_error": msg })),
                    code,
                }
            }

            AppError::Internal(msg) => {
                tracing::error!("❌ Error interno: {}", msg);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                    details: Some(json!({ "internal_error": msg })),
                    code,
                }
            }

            other => {
                tracing::warn!("⚠️ {}", other);
                let error = match &other {
                    AppError::Forbidden(_) => "Forbidden",
                    AppError::NotFound(_) => "Not Found",
                    AppError::AlreadyProcessed(_) => "Already Processed",
                    AppError::DuplicatePlate(_) => "Duplicate Plate",
                    AppError::VehicleUnavailable(_) => "Vehicle Unavailable",
                    AppError::Unauthorized(_) => "Unauthorized",
                    AppError::BadRequest(_) => "Bad Request",
                    AppError::Jwt(_) => "JWT Error",
                    _ => "Error",
                };
                let message = match other {
                    AppError::Forbidden(msg)
                    | AppError::NotFound(msg)
                    | AppError::AlreadyProcessed(msg)
                    | AppError::DuplicatePlate(msg)
                    | AppError::VehicleUnavailable(msg)
                    | AppError::Unauthorized(msg)
                    | AppError::BadRequest(msg)
                    | AppError::Jwt(msg) => msg,
                    rest => rest.to_string(),
                };
                ErrorResponse {
                    error: error.to_string(),
                    message,
                    details: None,
                    code,
                }
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str) -> AppError {
    AppError::Forbidden(format!("No tienes permiso para {}.", operation))
}
