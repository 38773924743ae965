use crate::models::VehicleLog;
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct VehicleLogRepository {
    pool: PgPool,
}

impl VehicleLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bitácora de un vehículo, más reciente primero
    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<VehicleLog>, AppError> {
        let logs = sqlx::query_as::<_, VehicleLog>(
            "SELECT * FROM vehicle_logs WHERE vehicle_id = $1 ORDER BY timestamp DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn append(conn: &mut PgConnection, log: &VehicleLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO vehicle_logs (id, vehicle_id, timestamp, event, notes)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(log.id)
        .bind(log.vehicle_id)
        .bind(log.timestamp)
        .bind(&log.event)
        .bind(&log.notes)
        .execute(conn)
        .await?;

        Ok(())
    }
}
