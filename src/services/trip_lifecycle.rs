//! Ciclo de vida de los viajes
//!
//! Completar un viaje cierra el ciclo: el vehículo vuelve a estar
//! disponible con el odómetro final.

use chrono::{DateTime, Utc};

use super::vehicle_registry::{set_status, StatusChange};
use crate::models::{LogEvent, Trip, Vehicle, VehicleStatus};
use crate::utils::errors::AppError;

/// Viaje completado y vehículo liberado, confirmados juntos
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub trip: Trip,
    pub vehicle_change: StatusChange,
}

pub fn complete(
    trip: &Trip,
    vehicle: &Vehicle,
    driver_username: &str,
    end_odometer: i64,
    now: DateTime<Utc>,
) -> Result<Completion, AppError> {
    if trip.vehicle_id != vehicle.id {
        return Err(AppError::Internal(
            "el viaje apunta a otro vehículo".to_string(),
        ));
    }

    let mut completed = trip.clone();
    let km_traveled = completed.complete(end_odometer, now)?;

    let mut vehicle_change = set_status(
        vehicle,
        VehicleStatus::Available,
        LogEvent::Available,
        Some(format!(
            "Viaje completado por {}. Kilómetros recorridos: {}",
            driver_username, km_traveled
        )),
        now,
    );
    vehicle_change.vehicle.current_odometer = end_odometer;

    Ok(Completion {
        trip: completed,
        vehicle_change,
    })
}
