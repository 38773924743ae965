use crate::models::{IdentityContext, TripReportRow};
use crate::repositories::{RequestRepository, TripRepository};
use crate::services::authorization_service::{authorize, Capability};
use crate::services::report_aggregator::build_trip_report;
use crate::utils::errors::AppResult;
use sqlx::PgPool;
use tracing::debug;

pub struct ReportController {
    trips: TripRepository,
    requests: RequestRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            requests: RequestRepository::new(pool),
        }
    }

    pub async fn trip_report(&self, identity: &IdentityContext) -> AppResult<Vec<TripReportRow>> {
        authorize(identity, Capability::AdminOnly, "ver los reportes")?;

        let completed = self.trips.find_completed().await?;
        let requests = self.requests.find_all().await?;
        let rows = build_trip_report(&completed, &requests);

        debug!("📊 Reporte de viajes: {} filas", rows.len());
        Ok(rows)
    }
}
