use serde::Serialize;

use crate::models::incident::IncidentWithDetails;
use crate::models::{Vehicle, VehicleRequest};
use crate::repositories::request_repository::PendingRequestRow;
use crate::repositories::trip_repository::ActiveTripRow;

// Tablero según el rol del llamador
#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum DashboardResponse {
    Admin {
        pending_requests: Vec<PendingRequestRow>,
        active_trips: Vec<ActiveTripRow>,
        vehicles: Vec<Vehicle>,
        pending_incidents: Vec<IncidentWithDetails>,
    },
    Worker {
        available_vehicles: Vec<Vehicle>,
        my_requests: Vec<VehicleRequest>,
    },
}
