//! Registro de vehículos
//!
//! Alta de vehículos y transiciones de estado. `set_status` es la única
//! puerta para cambiar el estado y siempre produce una entrada de bitácora;
//! los flujos de solicitudes, viajes e incidentes la usan internamente.

use chrono::{DateTime, Utc};

use crate::models::{LogEvent, Vehicle, VehicleLog, VehicleStatus};
use crate::utils::errors::AppError;
use crate::utils::validation::normalize_plate;

/// Vehículo modificado junto con la entrada de bitácora que lo acompaña.
/// Ambos se persisten en la misma transacción.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub vehicle: Vehicle,
    pub log: VehicleLog,
}

/// Datos de alta de un vehículo
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub license_plate: String,
    pub make: String,
    pub model: String,
    pub current_odometer: i64,
}

/// Alta de un vehículo. `plate_taken` indica si la placa normalizada ya existe.
pub fn register(
    input: NewVehicle,
    plate_taken: bool,
    now: DateTime<Utc>,
) -> Result<StatusChange, AppError> {
    let plate = normalize_plate(&input.license_plate);
    if plate_taken {
        return Err(AppError::DuplicatePlate(format!(
            "Ya existe un vehículo con la placa {}.",
            plate
        )));
    }
    if input.current_odometer < 0 {
        return Err(AppError::BadRequest(
            "El odómetro no puede ser negativo.".to_string(),
        ));
    }

    let vehicle = Vehicle::new(&plate, input.make, input.model, input.current_odometer, now);
    let log = VehicleLog::record(
        vehicle.id,
        LogEvent::Created,
        Some("Vehículo añadido al sistema.".to_string()),
        now,
    );
    Ok(StatusChange { vehicle, log })
}

/// Cambiar el estado de un vehículo y registrar el evento
pub fn set_status(
    vehicle: &Vehicle,
    new_status: VehicleStatus,
    event: LogEvent,
    note: Option<String>,
    now: DateTime<Utc>,
) -> StatusChange {
    let mut updated = vehicle.clone();
    updated.status = new_status;
    StatusChange {
        log: VehicleLog::record(updated.id, event, note, now),
        vehicle: updated,
    }
}

/// Enviar a mantenimiento. `None` si ya estaba en mantenimiento.
pub fn mark_maintenance(vehicle: &Vehicle, now: DateTime<Utc>) -> Option<StatusChange> {
    if vehicle.status == VehicleStatus::Maintenance {
        return None;
    }
    Some(set_status(
        vehicle,
        VehicleStatus::Maintenance,
        LogEvent::Maintenance,
        Some("Marcado por el administrador.".to_string()),
        now,
    ))
}

/// Liberar de mantenimiento. Sólo actúa si el estado es exactamente `maintenance`.
pub fn release_maintenance(vehicle: &Vehicle, now: DateTime<Utc>) -> Option<StatusChange> {
    if vehicle.status != VehicleStatus::Maintenance {
        return None;
    }
    Some(set_status(
        vehicle,
        VehicleStatus::Available,
        LogEvent::Available,
        Some("Mantenimiento completado.".to_string()),
        now,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_vehicle(plate: &str) -> NewVehicle {
        NewVehicle {
            license_plate: plate.to_string(),
            make: "Nissan".to_string(),
            model: "NP300".to_string(),
            current_odometer: 1000,
        }
    }

    #[test]
    fn test_register_normalizes_plate_and_logs_creation() {
        let change = register(new_vehicle(" abc-123"), false, Utc::now()).unwrap();
        assert_eq!(change.vehicle.license_plate, "ABC-123");
        assert_eq!(change.vehicle.status, VehicleStatus::Available);
        assert_eq!(change.vehicle.current_odometer, 1000);
        assert_eq!(change.log.vehicle_id, change.vehicle.id);
        assert_eq!(change.log.event, "Creado");
    }

    #[test]
    fn test_register_duplicate_plate() {
        let err = register(new_vehicle("abc-123"), true, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::DuplicatePlate(msg) if msg.contains("ABC-123")));
    }

    #[test]
    fn test_register_negative_odometer() {
        let mut input = new_vehicle("ABC-123");
        input.current_odometer = -1;
        assert!(matches!(
            register(input, false, Utc::now()),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_maintenance_toggle() {
        let vehicle = register(new_vehicle("ABC-123"), false, Utc::now())
            .unwrap()
            .vehicle;

        assert!(release_maintenance(&vehicle, Utc::now()).is_none());

        let entered = mark_maintenance(&vehicle, Utc::now()).unwrap();
        assert_eq!(entered.vehicle.status, VehicleStatus::Maintenance);
        assert_eq!(entered.log.event, "En mantenimiento");
        assert!(mark_maintenance(&entered.vehicle, Utc::now()).is_none());

        let released = release_maintenance(&entered.vehicle, Utc::now()).unwrap();
        assert_eq!(released.vehicle.status, VehicleStatus::Available);
        assert_eq!(released.log.event, "Disponible");
    }

    #[test]
    fn test_maintenance_allowed_from_any_other_status() {
        let mut vehicle = register(new_vehicle("ABC-123"), false, Utc::now())
            .unwrap()
            .vehicle;
        for status in [VehicleStatus::InUse, VehicleStatus::Incident] {
            vehicle.status = status;
            assert!(mark_maintenance(&vehicle, Utc::now()).is_some());
            assert!(release_maintenance(&vehicle, Utc::now()).is_none());
        }
    }
}
