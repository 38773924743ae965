//! Modelo de Trip
//!
//! Un viaje está activo mientras `end_time` sea nulo. Se completa una
//! sola vez y después es inmutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::vehicle_request::VehicleRequest;
use crate::utils::errors::AppError;

pub const TRIP_GONE: &str = "El viaje no existe o ya ha sido completado.";

/// Trip - mapea exactamente a la tabla trips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub request_id: Option<Uuid>,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub destination: String,
    pub reason: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub start_odometer: i64,
    pub end_odometer: Option<i64>,
    pub km_traveled: Option<i64>,
}

impl Trip {
    /// Viaje que nace de una solicitud aprobada
    pub fn start_from(request: &VehicleRequest, start_odometer: i64, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id: Some(request.id),
            user_id: request.user_id,
            vehicle_id: request.vehicle_id,
            destination: request.destination.clone(),
            reason: Some(request.reason.clone()),
            start_time: now,
            end_time: None,
            start_odometer,
            end_odometer: None,
            km_traveled: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Cerrar el viaje. Devuelve los kilómetros recorridos.
    pub fn complete(&mut self, end_odometer: i64, now: DateTime<Utc>) -> Result<i64, AppError> {
        if !self.is_active() {
            return Err(AppError::AlreadyProcessed(TRIP_GONE.to_string()));
        }
        if end_odometer < self.start_odometer {
            return Err(AppError::InvalidOdometer {
                start: self.start_odometer,
                end: end_odometer,
            });
        }

        let km_traveled = end_odometer - self.start_odometer;
        self.end_time = Some(now);
        self.end_odometer = Some(end_odometer);
        self.km_traveled = Some(km_traveled);
        Ok(km_traveled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle_request::sample_request;

    #[test]
    fn test_start_copies_request_fields() {
        let request = sample_request(Uuid::new_v4(), Uuid::new_v4());
        let trip = Trip::start_from(&request, 1000, Utc::now());

        assert_eq!(trip.request_id, Some(request.id));
        assert_eq!(trip.user_id, request.user_id);
        assert_eq!(trip.vehicle_id, request.vehicle_id);
        assert_eq!(trip.destination, request.destination);
        assert_eq!(trip.start_odometer, 1000);
        assert!(trip.is_active());
    }

    #[test]
    fn test_complete_computes_distance() {
        let request = sample_request(Uuid::new_v4(), Uuid::new_v4());
        let mut trip = Trip::start_from(&request, 1000, Utc::now());

        assert_eq!(trip.complete(1150, Utc::now()).unwrap(), 150);
        assert_eq!(trip.end_odometer, Some(1150));
        assert_eq!(trip.km_traveled, Some(150));
        assert!(!trip.is_active());
    }

    #[test]
    fn test_complete_with_same_odometer_is_zero_km() {
        let request = sample_request(Uuid::new_v4(), Uuid::new_v4());
        let mut trip = Trip::start_from(&request, 500, Utc::now());
        assert_eq!(trip.complete(500, Utc::now()).unwrap(), 0);
    }

    #[test]
    fn test_lower_odometer_leaves_trip_untouched() {
        let request = sample_request(Uuid::new_v4(), Uuid::new_v4());
        let mut trip = Trip::start_from(&request, 1000, Utc::now());
        let before = trip.clone();

        let err = trip.complete(900, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::InvalidOdometer { start: 1000, end: 900 }));
        assert_eq!(trip, before);
    }

    #[test]
    fn test_completed_trip_is_immutable() {
        let request = sample_request(Uuid::new_v4(), Uuid::new_v4());
        let mut trip = Trip::start_from(&request, 1000, Utc::now());
        trip.complete(1100, Utc::now()).unwrap();
        let before = trip.clone();

        assert!(matches!(
            trip.complete(1200, Utc::now()),
            Err(AppError::AlreadyProcessed(_))
        ));
        assert_eq!(trip, before);
    }
}
