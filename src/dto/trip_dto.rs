use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Trip, Vehicle};

// Cierre de viaje con el odómetro final; el rango lo decide `Trip::complete`
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteTripRequest {
    pub end_odometer: i64,
}

// Viaje con su vehículo (formulario de cierre)
#[derive(Debug, Serialize)]
pub struct TripDetailsResponse {
    pub trip: Trip,
    pub vehicle: Option<Vehicle>,
}
