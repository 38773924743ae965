use crate::dto::dashboard_dto::DashboardResponse;
use crate::models::{IdentityContext, IncidentStatus, VehicleStatus};
use crate::repositories::{IncidentRepository, RequestRepository, TripRepository, VehicleRepository};
use crate::services::authorization_service::{authorize, Capability};
use crate::utils::errors::AppResult;
use sqlx::PgPool;

pub struct DashboardController {
    vehicles: VehicleRepository,
    requests: RequestRepository,
    trips: TripRepository,
    incidents: IncidentRepository,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            requests: RequestRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            incidents: IncidentRepository::new(pool),
        }
    }

    pub async fn dashboard(&self, identity: &IdentityContext) -> AppResult<DashboardResponse> {
        authorize(identity, Capability::AnyUser, "ver el tablero")?;

        if identity.is_admin() {
            return Ok(DashboardResponse::Admin {
                pending_requests: self.requests.find_pending().await?,
                active_trips: self.trips.find_active().await?,
                vehicles: self.vehicles.find_all().await?,
                pending_incidents: self
                    .incidents
                    .find_by_status_with_details(IncidentStatus::Pending)
                    .await?,
            });
        }

        Ok(DashboardResponse::Worker {
            available_vehicles: self.vehicles.find_by_status(VehicleStatus::Available).await?,
            my_requests: self.requests.find_by_user(identity.user_id).await?,
        })
    }
}
