use crate::dto::request_dto::CreateVehicleRequestBody;
use crate::models::vehicle_request::REQUEST_GONE;
use crate::models::{IdentityContext, RequestStatus, Trip, VehicleRequest};
use crate::repositories::{RequestRepository, TripRepository, UserRepository, VehicleRepository};
use crate::services::authorization_service::{authorize, Capability};
use crate::services::request_workflow;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use super::persist_status_change;
use super::vehicle_controller::VEHICLE_NOT_FOUND;

pub struct RequestController {
    pool: PgPool,
}

impl RequestController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        identity: &IdentityContext,
        body: CreateVehicleRequestBody,
    ) -> Result<VehicleRequest, AppError> {
        authorize(identity, Capability::WorkerOnly, "solicitar vehículos")?;
        body.validate()?;

        let mut tx = self.pool.begin().await?;
        let vehicle = VehicleRepository::lock_by_id(&mut *tx, body.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;

        let request = request_workflow::create(identity, &vehicle, body.into(), Utc::now())?;
        RequestRepository::insert(&mut *tx, &request).await?;
        tx.commit().await?;

        info!(
            "📝 Solicitud {} creada por {} para {}",
            request.id, identity.username, vehicle.license_plate
        );
        Ok(request)
    }

    /// Aprobar: solicitud aprobada, viaje creado, vehículo en uso y bitácora,
    /// todo en una sola transacción.
    pub async fn approve(&self, identity: &IdentityContext, id: Uuid) -> Result<Trip, AppError> {
        authorize(identity, Capability::AdminOnly, "aprobar solicitudes")?;

        let mut tx = self.pool.begin().await?;
        let request = lock_request(&mut *tx, id).await?;
        let vehicle = VehicleRepository::lock_by_id(&mut *tx, request.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;
        let requester = UserRepository::find_by_id(&mut *tx, request.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado.".to_string()))?;

        let approval = request_workflow::approve(&request, &vehicle, &requester.username, Utc::now())?;

        conclude(&mut *tx, id, RequestStatus::Approved).await?;
        TripRepository::insert(&mut *tx, &approval.trip).await?;
        persist_status_change(&mut *tx, &approval.vehicle_change).await?;
        tx.commit().await?;

        info!(
            "✅ Solicitud {} aprobada por {}; viaje {} en {}",
            id, identity.username, approval.trip.id, vehicle.license_plate
        );
        Ok(approval.trip)
    }

    pub async fn reject(&self, identity: &IdentityContext, id: Uuid) -> Result<VehicleRequest, AppError> {
        authorize(identity, Capability::AdminOnly, "rechazar solicitudes")?;

        let mut tx = self.pool.begin().await?;
        let request = lock_request(&mut *tx, id).await?;
        let rejected = request_workflow::reject(&request)?;
        conclude(&mut *tx, id, RequestStatus::Rejected).await?;
        tx.commit().await?;

        info!("❌ Solicitud {} rechazada por {}", id, identity.username);
        Ok(rejected)
    }
}

async fn lock_request(conn: &mut PgConnection, id: Uuid) -> Result<VehicleRequest, AppError> {
    RequestRepository::lock_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound(REQUEST_GONE.to_string()))
}

async fn conclude(conn: &mut PgConnection, id: Uuid, outcome: RequestStatus) -> Result<(), AppError> {
    if !RequestRepository::conclude_if_pending(conn, id, outcome).await? {
        warn!("⚠️ Solicitud {} procesada por otra sesión", id);
        return Err(AppError::AlreadyProcessed(REQUEST_GONE.to_string()));
    }
    Ok(())
}
