//! Modelos del reporte de viajes

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Viaje completado con usuario y vehículo ya resueltos
#[derive(Debug, Clone, FromRow)]
pub struct CompletedTripRow {
    pub trip_id: Uuid,
    pub request_id: Option<Uuid>,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub username: String,
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub destination: String,
    pub reason: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub start_odometer: i64,
    pub end_odometer: Option<i64>,
    pub km_traveled: Option<i64>,
}

/// Fila del reporte de auditoría/exportación
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripReportRow {
    pub trip_id: Uuid,
    pub departure: String,
    pub return_time: String,
    pub custodian: String,
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub start_odometer: i64,
    pub end_odometer: Option<i64>,
    pub km_traveled: Option<i64>,
    pub responsible: String,
    pub num_auditors: String,
    pub auditors_names: String,
    pub destination: String,
    pub reason: Option<String>,
}
