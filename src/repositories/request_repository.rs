use crate::models::{RequestStatus, VehicleRequest};
use crate::utils::errors::AppError;
use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

/// Solicitud pendiente con solicitante y placa para el tablero
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PendingRequestRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub requester_username: String,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub destination: String,
    pub reason: String,
    pub responsible_name: String,
    pub num_auditors: i32,
    pub auditors_names: String,
    pub date_requested: chrono::DateTime<chrono::Utc>,
}

pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todas las solicitudes, más antiguas primero (orden del join del reporte)
    pub async fn find_all(&self) -> Result<Vec<VehicleRequest>, AppError> {
        let requests = sqlx::query_as::<_, VehicleRequest>(
            "SELECT * FROM vehicle_requests ORDER BY date_requested ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<VehicleRequest>, AppError> {
        let requests = sqlx::query_as::<_, VehicleRequest>(
            "SELECT * FROM vehicle_requests WHERE user_id = $1 ORDER BY date_requested DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn find_pending(&self) -> Result<Vec<PendingRequestRow>, AppError> {
        let requests = sqlx::query_as::<_, PendingRequestRow>(
            r#"
            SELECT r.id, r.user_id, u.username AS requester_username, r.vehicle_id,
                   v.license_plate, r.destination, r.reason, r.responsible_name,
                   r.num_auditors, r.auditors_names, r.date_requested
            FROM vehicle_requests r
            JOIN users u ON u.id = r.user_id
            JOIN vehicles v ON v.id = r.vehicle_id
            WHERE r.status = 'pending'
            ORDER BY r.date_requested ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<VehicleRequest>, AppError> {
        let request = sqlx::query_as::<_, VehicleRequest>(
            "SELECT * FROM vehicle_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(request)
    }

    pub async fn insert(conn: &mut PgConnection, request: &VehicleRequest) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO vehicle_requests (
                id, user_id, vehicle_id, destination, reason, responsible_name,
                num_auditors, auditors_names, status, date_requested
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(request.id)
        .bind(request.user_id)
        .bind(request.vehicle_id)
        .bind(&request.destination)
        .bind(&request.reason)
        .bind(&request.responsible_name)
        .bind(request.num_auditors)
        .bind(&request.auditors_names)
        .bind(request.status)
        .bind(request.date_requested)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Compare-and-set: sólo transiciona si la solicitud sigue pendiente.
    /// Devuelve `false` si otro administrador ya la procesó.
    pub async fn conclude_if_pending(
        conn: &mut PgConnection,
        id: Uuid,
        outcome: RequestStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE vehicle_requests SET status = $2 WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(outcome)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
