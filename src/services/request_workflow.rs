//! Flujo de solicitudes de vehículo
//!
//! Un trabajador solicita un vehículo disponible; un administrador aprueba
//! o rechaza. La aprobación crea el viaje y pone el vehículo en uso.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::vehicle_registry::{set_status, StatusChange};
use crate::models::{
    IdentityContext, LogEvent, RequestStatus, Trip, Vehicle, VehicleRequest, VehicleStatus,
};
use crate::utils::errors::AppError;

/// Datos de una nueva solicitud
#[derive(Debug, Clone)]
pub struct NewVehicleRequest {
    pub vehicle_id: Uuid,
    pub destination: String,
    pub reason: String,
    pub responsible_name: String,
    pub num_auditors: i32,
    pub auditors_names: String,
}

/// Resultado de aprobar: las tres mutaciones que se confirman juntas
#[derive(Debug, Clone, PartialEq)]
pub struct Approval {
    pub request: VehicleRequest,
    pub trip: Trip,
    pub vehicle_change: StatusChange,
}

fn unavailable(vehicle: &Vehicle) -> AppError {
    AppError::VehicleUnavailable(format!(
        "El vehículo {} no está disponible ({}).",
        vehicle.license_plate, vehicle.status
    ))
}

/// Crear una solicitud pendiente. Falla si el vehículo no está disponible.
pub fn create(
    requester: &IdentityContext,
    vehicle: &Vehicle,
    input: NewVehicleRequest,
    now: DateTime<Utc>,
) -> Result<VehicleRequest, AppError> {
    if input.vehicle_id != vehicle.id {
        return Err(AppError::Internal(
            "la solicitud apunta a otro vehículo".to_string(),
        ));
    }
    if !vehicle.is_available() {
        return Err(unavailable(vehicle));
    }
    if input.num_auditors < 0 {
        return Err(AppError::BadRequest(
            "El número de auditores no puede ser negativo.".to_string(),
        ));
    }

    Ok(VehicleRequest {
        id: Uuid::new_v4(),
        user_id: requester.user_id,
        vehicle_id: vehicle.id,
        destination: input.destination,
        reason: input.reason,
        responsible_name: input.responsible_name,
        num_auditors: input.num_auditors,
        auditors_names: input.auditors_names,
        status: RequestStatus::Pending,
        date_requested: now,
    })
}

/// Aprobar una solicitud pendiente.
///
/// La disponibilidad del vehículo se vuelve a comprobar aquí: entre la
/// creación y la aprobación el vehículo pudo entrar a mantenimiento o tener
/// un incidente.
pub fn approve(
    request: &VehicleRequest,
    vehicle: &Vehicle,
    requester_username: &str,
    now: DateTime<Utc>,
) -> Result<Approval, AppError> {
    let mut approved = request.clone();
    approved.conclude(RequestStatus::Approved)?;

    if request.vehicle_id != vehicle.id {
        return Err(AppError::Internal(
            "la solicitud apunta a otro vehículo".to_string(),
        ));
    }
    if !vehicle.is_available() {
        return Err(unavailable(vehicle));
    }

    let trip = Trip::start_from(&approved, vehicle.current_odometer, now);
    let vehicle_change = set_status(
        vehicle,
        VehicleStatus::InUse,
        LogEvent::InUse,
        Some(format!(
            "Asignado a {} para viaje a {}",
            requester_username, approved.destination
        )),
        now,
    );

    Ok(Approval {
        request: approved,
        trip,
        vehicle_change,
    })
}

/// Rechazar una solicitud pendiente. No toca vehículo, viaje ni bitácora.
pub fn reject(request: &VehicleRequest) -> Result<VehicleRequest, AppError> {
    let mut rejected = request.clone();
    rejected.conclude(RequestStatus::Rejected)?;
    Ok(rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn vehicle(status: VehicleStatus) -> Vehicle {
        let mut vehicle = Vehicle::new("ABC-123", "Nissan", "NP300", 1000, Utc::now());
        vehicle.status = status;
        vehicle
    }

    fn worker() -> IdentityContext {
        IdentityContext::new(Uuid::new_v4(), "auditor1", UserRole::Worker)
    }

    fn input(vehicle: &Vehicle) -> NewVehicleRequest {
        NewVehicleRequest {
            vehicle_id: vehicle.id,
            destination: "Oaxaca".to_string(),
            reason: "Auditoría".to_string(),
            responsible_name: "Lic. Pérez".to_string(),
            num_auditors: 2,
            auditors_names: "Ana, Luis".to_string(),
        }
    }

    #[test]
    fn test_create_pending_request() {
        let vehicle = vehicle(VehicleStatus::Available);
        let worker = worker();
        let request = create(&worker, &vehicle, input(&vehicle), Utc::now()).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.user_id, worker.user_id);
        assert_eq!(request.vehicle_id, vehicle.id);
    }

    #[test]
    fn test_create_on_unavailable_vehicle() {
        for status in [
            VehicleStatus::InUse,
            VehicleStatus::Maintenance,
            VehicleStatus::Incident,
        ] {
            let vehicle = vehicle(status);
            let err = create(&worker(), &vehicle, input(&vehicle), Utc::now()).unwrap_err();
            assert!(matches!(err, AppError::VehicleUnavailable(_)));
        }
    }

    #[test]
    fn test_approve_spawns_trip_and_marks_in_use() {
        let vehicle = vehicle(VehicleStatus::Available);
        let request = create(&worker(), &vehicle, input(&vehicle), Utc::now()).unwrap();

        let approval = approve(&request, &vehicle, "auditor1", Utc::now()).unwrap();
        assert_eq!(approval.request.status, RequestStatus::Approved);
        assert_eq!(approval.trip.start_odometer, 1000);
        assert_eq!(approval.trip.request_id, Some(request.id));
        assert_eq!(approval.vehicle_change.vehicle.status, VehicleStatus::InUse);
        assert_eq!(approval.vehicle_change.log.event, "En uso");
        assert_eq!(
            approval.vehicle_change.log.notes.as_deref(),
            Some("Asignado a auditor1 para viaje a Oaxaca")
        );
    }

    #[test]
    fn test_approve_rechecks_availability() {
        let available = vehicle(VehicleStatus::Available);
        let request = create(&worker(), &available, input(&available), Utc::now()).unwrap();

        let mut in_maintenance = available.clone();
        in_maintenance.status = VehicleStatus::Maintenance;
        let err = approve(&request, &in_maintenance, "auditor1", Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::VehicleUnavailable(_)));
    }

    #[test]
    fn test_processed_request_cannot_be_approved_or_rejected() {
        let vehicle = vehicle(VehicleStatus::Available);
        let request = create(&worker(), &vehicle, input(&vehicle), Utc::now()).unwrap();
        let rejected = reject(&request).unwrap();
        assert_eq!(rejected.status, RequestStatus::Rejected);

        assert!(matches!(
            approve(&rejected, &vehicle, "auditor1", Utc::now()),
            Err(AppError::AlreadyProcessed(_))
        ));
        assert!(matches!(reject(&rejected), Err(AppError::AlreadyProcessed(_))));
    }
}
