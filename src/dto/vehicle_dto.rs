use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Trip, Vehicle, VehicleLog};
use crate::services::vehicle_registry::NewVehicle;
use crate::utils::validation::{validate_license_plate, validate_not_blank};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: String,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub make: String,

    #[validate(length(min = 1, max = 50), custom = "validate_not_blank")]
    pub model: String,

    #[validate(range(min = 0))]
    #[serde(default)]
    pub current_odometer: i64,
}

impl From<CreateVehicleRequest> for NewVehicle {
    fn from(request: CreateVehicleRequest) -> Self {
        Self {
            license_plate: request.license_plate,
            make: request.make.trim().to_string(),
            model: request.model.trim().to_string(),
            current_odometer: request.current_odometer,
        }
    }
}

// Detalle de vehículo: viajes y bitácora
#[derive(Debug, Serialize)]
pub struct VehicleDetailsResponse {
    pub vehicle: Vehicle,
    pub trips: Vec<Trip>,
    pub logs: Vec<VehicleLog>,
}
