use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::services::request_workflow::NewVehicleRequest;
use crate::utils::validation::validate_not_blank;

// Request de un trabajador para usar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequestBody {
    pub vehicle_id: Uuid,

    #[validate(length(min = 1, max = 120), custom = "validate_not_blank")]
    pub destination: String,

    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub reason: String,

    #[validate(length(min = 1, max = 120), custom = "validate_not_blank")]
    pub responsible_name: String,

    #[validate(range(min = 0, max = 100))]
    pub num_auditors: i32,

    #[serde(default)]
    pub auditors_names: String,
}

impl From<CreateVehicleRequestBody> for NewVehicleRequest {
    fn from(body: CreateVehicleRequestBody) -> Self {
        Self {
            vehicle_id: body.vehicle_id,
            destination: body.destination.trim().to_string(),
            reason: body.reason.trim().to_string(),
            responsible_name: body.responsible_name.trim().to_string(),
            num_auditors: body.num_auditors,
            auditors_names: body.auditors_names.trim().to_string(),
        }
    }
}
