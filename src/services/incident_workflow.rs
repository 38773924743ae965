//! Flujo de incidentes
//!
//! Canal lateral que saca un vehículo de servicio (`incident`) y lo
//! devuelve a `available` cuando un administrador resuelve el reporte.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::vehicle_registry::{set_status, StatusChange};
use crate::models::{
    IdentityContext, IncidentReport, IncidentStatus, LogEvent, Vehicle, VehicleStatus,
};
use crate::utils::errors::AppError;

/// Datos capturados en el formulario de incidente
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub incident_type: String,
    pub description: String,
    pub location: Option<String>,
}

/// Reporte creado y, si aplica, el cambio de estado del vehículo
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentFiling {
    pub incident: IncidentReport,
    pub vehicle_change: Option<StatusChange>,
}

/// Incidente resuelto y, si aplica, el vehículo devuelto a disponible
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentResolution {
    pub incident: IncidentReport,
    pub vehicle_change: Option<StatusChange>,
}

/// Reportar un incidente. Siempre crea el reporte; el vehículo sólo pasa a
/// `incident` (y se registra en bitácora) si no lo estaba ya.
pub fn report(
    vehicle: &Vehicle,
    reporter: &IdentityContext,
    input: NewIncident,
    now: DateTime<Utc>,
) -> IncidentFiling {
    let vehicle_change = (vehicle.status != VehicleStatus::Incident).then(|| {
        set_status(
            vehicle,
            VehicleStatus::Incident,
            LogEvent::IncidentReported,
            Some(format!(
                "Reporte de {} por {}.",
                input.incident_type, reporter.username
            )),
            now,
        )
    });

    let incident = IncidentReport {
        id: Uuid::new_v4(),
        vehicle_id: vehicle.id,
        user_id: reporter.user_id,
        report_date: now,
        incident_type: input.incident_type,
        description: input.description,
        location: input.location,
        status: IncidentStatus::Pending,
    };

    IncidentFiling {
        incident,
        vehicle_change,
    }
}

/// Resolver un incidente.
///
/// Si el vehículo sigue en `incident` vuelve a `available`, aunque existan
/// otros incidentes pendientes del mismo vehículo.
pub fn resolve(
    incident: &IncidentReport,
    vehicle: &Vehicle,
    now: DateTime<Utc>,
) -> Result<IncidentResolution, AppError> {
    if incident.is_resolved() {
        return Err(AppError::AlreadyProcessed(
            "El incidente ya fue resuelto.".to_string(),
        ));
    }
    if incident.vehicle_id != vehicle.id {
        return Err(AppError::Internal(
            "el incidente apunta a otro vehículo".to_string(),
        ));
    }

    let mut resolved = incident.clone();
    resolved.status = IncidentStatus::Resolved;

    let vehicle_change = (vehicle.status == VehicleStatus::Incident).then(|| {
        set_status(
            vehicle,
            VehicleStatus::Available,
            LogEvent::IncidentResolved,
            Some(format!(
                "Incidente #{} resuelto. Vehículo ahora disponible.",
                incident.id
            )),
            now,
        )
    });

    Ok(IncidentResolution {
        incident: resolved,
        vehicle_change,
    })
}
