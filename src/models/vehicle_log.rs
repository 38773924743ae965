//! Bitácora de vehículos
//!
//! Entradas de sólo-anexión. Cada operación que cambia el estado de un
//! vehículo produce exactamente una.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Eventos registrados en la bitácora
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEvent {
    Created,
    InUse,
    Available,
    Maintenance,
    IncidentReported,
    IncidentResolved,
}

impl LogEvent {
    /// Etiqueta legible que se guarda en la columna `event`
    pub fn label(&self) -> &'static str {
        match self {
            LogEvent::Created => "Creado",
            LogEvent::InUse => "En uso",
            LogEvent::Available => "Disponible",
            LogEvent::Maintenance => "En mantenimiento",
            LogEvent::IncidentReported => "Incidente reportado",
            LogEvent::IncidentResolved => "Incidente Resuelto",
        }
    }
}

/// VehicleLog - mapea exactamente a la tabla vehicle_logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VehicleLog {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: String,
    pub notes: Option<String>,
}

impl VehicleLog {
    pub fn record(
        vehicle_id: Uuid,
        event: LogEvent,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vehicle_id,
            timestamp: now,
            event: event.label().to_string(),
            notes,
        }
    }
}
