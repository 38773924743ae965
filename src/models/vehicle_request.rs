//! Modelo de solicitud de vehículo
//!
//! Máquina de estados: `pending → approved` | `pending → rejected`.
//! Ambos destinos son terminales.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Mensaje único para solicitudes inexistentes o ya procesadas
pub const REQUEST_GONE: &str = "La solicitud no existe o ya ha sido procesada.";

/// Estado de la solicitud - mapea al ENUM request_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// VehicleRequest - mapea exactamente a la tabla vehicle_requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct VehicleRequest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub destination: String,
    pub reason: String,
    pub responsible_name: String,
    pub num_auditors: i32,
    pub auditors_names: String,
    pub status: RequestStatus,
    pub date_requested: DateTime<Utc>,
}

impl VehicleRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Fijar el estado final. Sólo se permite una vez, desde `pending`.
    pub fn conclude(&mut self, outcome: RequestStatus) -> Result<(), AppError> {
        if outcome == RequestStatus::Pending {
            return Err(AppError::Internal(
                "una solicitud no puede volver a pending".to_string(),
            ));
        }
        if !self.is_pending() {
            return Err(AppError::AlreadyProcessed(REQUEST_GONE.to_string()));
        }
        self.status = outcome;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_request(user_id: Uuid, vehicle_id: Uuid) -> VehicleRequest {
    VehicleRequest {
        id: Uuid::new_v4(),
        user_id,
        vehicle_id,
        destination: "Oaxaca".to_string(),
        reason: "Auditoría".to_string(),
        responsible_name: "Lic. Pérez".to_string(),
        num_auditors: 2,
        auditors_names: "Ana, Luis".to_string(),
        status: RequestStatus::Pending,
        date_requested: Utc::now(),
    }
}
