use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleDetailsResponse};
use crate::models::{IdentityContext, Vehicle};
use crate::repositories::{TripRepository, VehicleLogRepository, VehicleRepository};
use crate::services::authorization_service::{authorize, Capability};
use crate::services::vehicle_registry::{self, StatusChange};
use crate::utils::errors::AppError;
use crate::utils::validation::normalize_plate;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::persist_status_change;

pub const VEHICLE_NOT_FOUND: &str = "Vehículo no encontrado.";

pub struct VehicleController {
    pool: PgPool,
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn create(
        &self,
        identity: &IdentityContext,
        request: CreateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        authorize(identity, Capability::AdminOnly, "añadir vehículos")?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let plate = normalize_plate(&request.license_plate);
        let plate_taken = VehicleRepository::license_plate_exists(&mut *tx, &plate).await?;

        let StatusChange { vehicle, log } =
            vehicle_registry::register(request.into(), plate_taken, Utc::now())?;
        VehicleRepository::insert(&mut *tx, &vehicle).await?;
        VehicleLogRepository::append(&mut *tx, &log).await?;
        tx.commit().await?;

        info!("🚗 Vehículo {} ({}) añadido por {}", vehicle.license_plate, vehicle.id, identity.username);
        Ok(vehicle)
    }

    pub async fn list(&self, identity: &IdentityContext) -> Result<Vec<Vehicle>, AppError> {
        authorize(identity, Capability::AnyUser, "ver vehículos")?;
        self.repository.find_all().await
    }

    pub async fn details(
        &self,
        identity: &IdentityContext,
        id: Uuid,
    ) -> Result<VehicleDetailsResponse, AppError> {
        authorize(identity, Capability::AdminOnly, "ver los detalles de los vehículos")?;

        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;
        let trips = TripRepository::new(self.pool.clone()).find_by_vehicle(id).await?;
        let logs = VehicleLogRepository::new(self.pool.clone()).find_by_vehicle(id).await?;

        Ok(VehicleDetailsResponse { vehicle, trips, logs })
    }

    pub async fn mark_maintenance(&self, identity: &IdentityContext, id: Uuid) -> Result<Vehicle, AppError> {
        authorize(identity, Capability::AdminOnly, "realizar esta acción")?;
        self.toggle_maintenance(id, vehicle_registry::mark_maintenance).await
    }

    pub async fn release_maintenance(&self, identity: &IdentityContext, id: Uuid) -> Result<Vehicle, AppError> {
        authorize(identity, Capability::AdminOnly, "realizar esta acción")?;
        self.toggle_maintenance(id, vehicle_registry::release_maintenance).await
    }

    async fn toggle_maintenance(
        &self,
        id: Uuid,
        transition: fn(&Vehicle, chrono::DateTime<Utc>) -> Option<StatusChange>,
    ) -> Result<Vehicle, AppError> {
        let mut tx = self.pool.begin().await?;
        let vehicle = VehicleRepository::lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;

        let Some(change) = transition(&vehicle, Utc::now()) else {
            // sin cambio: nada que registrar
            return Ok(vehicle);
        };

        persist_status_change(&mut *tx, &change).await?;
        tx.commit().await?;

        info!("🔧 Vehículo {} ahora {}", change.vehicle.license_plate, change.vehicle.status);
        Ok(change.vehicle)
    }
}
