use crate::dto::trip_dto::{CompleteTripRequest, TripDetailsResponse};
use crate::models::trip::TRIP_GONE;
use crate::models::{IdentityContext, Trip};
use crate::repositories::{TripRepository, UserRepository, VehicleRepository};
use crate::services::authorization_service::{authorize, Capability};
use crate::services::trip_lifecycle;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::persist_status_change;
use super::vehicle_controller::VEHICLE_NOT_FOUND;

pub struct TripController {
    pool: PgPool,
    repository: TripRepository,
}

impl TripController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TripRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn details(&self, identity: &IdentityContext, id: Uuid) -> Result<TripDetailsResponse, AppError> {
        authorize(identity, Capability::AdminOnly, "ver viajes")?;

        let trip = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(TRIP_GONE.to_string()))?;
        let vehicle = VehicleRepository::new(self.pool.clone())
            .find_by_id(trip.vehicle_id)
            .await?;

        Ok(TripDetailsResponse { trip, vehicle })
    }

    pub async fn complete(
        &self,
        identity: &IdentityContext,
        id: Uuid,
        request: CompleteTripRequest,
    ) -> Result<Trip, AppError> {
        authorize(identity, Capability::AdminOnly, "completar viajes")?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let trip = TripRepository::lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(TRIP_GONE.to_string()))?;
        let vehicle = VehicleRepository::lock_by_id(&mut *tx, trip.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;
        let driver = UserRepository::find_by_id(&mut *tx, trip.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado.".to_string()))?;

        let completion =
            trip_lifecycle::complete(&trip, &vehicle, &driver.username, request.end_odometer, Utc::now())?;

        if !TripRepository::complete_if_active(&mut *tx, &completion.trip).await? {
            warn!("⚠️ Viaje {} completado por otra sesión", id);
            return Err(AppError::AlreadyProcessed(TRIP_GONE.to_string()));
        }
        persist_status_change(&mut *tx, &completion.vehicle_change).await?;
        tx.commit().await?;

        info!(
            "🏁 Viaje {} completado: {} km en {}",
            id,
            completion.trip.km_traveled.unwrap_or_default(),
            vehicle.license_plate
        );
        Ok(completion.trip)
    }
}
