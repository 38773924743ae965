use crate::dto::incident_dto::ReportIncidentRequest;
use crate::models::incident::IncidentWithDetails;
use crate::models::{IdentityContext, IncidentReport, IncidentStatus};
use crate::repositories::{IncidentRepository, VehicleRepository};
use crate::services::authorization_service::{authorize, Capability};
use crate::services::incident_workflow;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::persist_status_change;
use super::vehicle_controller::VEHICLE_NOT_FOUND;

const INCIDENT_NOT_FOUND: &str = "Reporte de incidente no encontrado.";

pub struct IncidentController {
    pool: PgPool,
    repository: IncidentRepository,
}

impl IncidentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: IncidentRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn report(
        &self,
        identity: &IdentityContext,
        vehicle_id: Uuid,
        request: ReportIncidentRequest,
    ) -> Result<IncidentReport, AppError> {
        authorize(identity, Capability::AnyUser, "reportar incidentes")?;
        request.validate()?;

        let mut tx = self.pool.begin().await?;
        let vehicle = VehicleRepository::lock_by_id(&mut *tx, vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;

        let filing = incident_workflow::report(&vehicle, identity, request.into(), Utc::now());
        IncidentRepository::insert(&mut *tx, &filing.incident).await?;
        if let Some(change) = &filing.vehicle_change {
            persist_status_change(&mut *tx, change).await?;
        }
        tx.commit().await?;

        info!(
            "🚨 Incidente {} ({}) reportado por {} en {}",
            filing.incident.id, filing.incident.incident_type, identity.username, vehicle.license_plate
        );
        Ok(filing.incident)
    }

    pub async fn list(
        &self,
        identity: &IdentityContext,
        status: Option<IncidentStatus>,
    ) -> Result<Vec<IncidentWithDetails>, AppError> {
        authorize(identity, Capability::AdminOnly, "ver los incidentes")?;
        match status {
            Some(status) => self.repository.find_by_status_with_details(status).await,
            None => self.repository.find_all_with_details().await,
        }
    }

    pub async fn details(&self, identity: &IdentityContext, id: Uuid) -> Result<IncidentWithDetails, AppError> {
        authorize(identity, Capability::AdminOnly, "ver los incidentes")?;
        self.repository
            .find_with_details(id)
            .await?
            .ok_or_else(|| AppError::NotFound(INCIDENT_NOT_FOUND.to_string()))
    }

    pub async fn resolve(&self, identity: &IdentityContext, id: Uuid) -> Result<IncidentReport, AppError> {
        authorize(identity, Capability::AdminOnly, "resolver incidentes")?;

        let mut tx = self.pool.begin().await?;
        let incident = IncidentRepository::lock_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound(INCIDENT_NOT_FOUND.to_string()))?;
        let vehicle = VehicleRepository::lock_by_id(&mut *tx, incident.vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(VEHICLE_NOT_FOUND.to_string()))?;

        let resolution = incident_workflow::resolve(&incident, &vehicle, Utc::now())?;
        IncidentRepository::update_status(&mut *tx, id, resolution.incident.status).await?;
        if let Some(change) = &resolution.vehicle_change {
            persist_status_change(&mut *tx, change).await?;
        }
        tx.commit().await?;

        info!("🛠️ Incidente {} resuelto por {}", id, identity.username);
        Ok(resolution.incident)
    }
}
