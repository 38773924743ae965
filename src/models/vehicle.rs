//! Modelo de Vehicle
//!
//! El vehículo es la entidad raíz de la flota. Su estado sólo cambia a
//! través de los flujos de solicitudes, viajes, incidentes y mantenimiento.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::validation::normalize_plate;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
    Incident,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::InUse => "in_use",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Incident => "incident",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehicle - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub status: VehicleStatus,
    pub current_odometer: i64,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Nuevo vehículo disponible con la placa normalizada
    pub fn new(
        license_plate: &str,
        make: impl Into<String>,
        model: impl Into<String>,
        current_odometer: i64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            license_plate: normalize_plate(license_plate),
            make: make.into(),
            model: model.into(),
            status: VehicleStatus::Available,
            current_odometer,
            created_at: now,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}
