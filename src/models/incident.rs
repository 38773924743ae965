//! Modelo de IncidentReport

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del incidente - mapea al ENUM incident_status.
/// `InProgress` existe en el esquema pero ningún flujo lo asigna.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "incident_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Pending,
    InProgress,
    Resolved,
}

/// IncidentReport - mapea exactamente a la tabla incident_reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct IncidentReport {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub report_date: DateTime<Utc>,
    pub incident_type: String,
    pub description: String,
    pub location: Option<String>,
    pub status: IncidentStatus,
}

impl IncidentReport {
    pub fn is_resolved(&self) -> bool {
        self.status == IncidentStatus::Resolved
    }
}

/// Incidente con el usuario y la placa resueltos por join explícito
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IncidentWithDetails {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub user_id: Uuid,
    pub reporter_username: String,
    pub report_date: DateTime<Utc>,
    pub incident_type: String,
    pub description: String,
    pub location: Option<String>,
    pub status: IncidentStatus,
}
