use crate::models::report::CompletedTripRow;
use crate::models::Trip;
use crate::utils::errors::AppError;
use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

/// Viaje activo con conductor y vehículo para el tablero
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ActiveTripRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub vehicle_id: Uuid,
    pub license_plate: String,
    pub destination: String,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub start_odometer: i64,
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    pub async fn find_active(&self) -> Result<Vec<ActiveTripRow>, AppError> {
        let trips = sqlx::query_as::<_, ActiveTripRow>(
            r#"
            SELECT t.id, t.user_id, u.username, t.vehicle_id, v.license_plate,
                   t.destination, t.start_time, t.start_odometer
            FROM trips t
            JOIN users u ON u.id = t.user_id
            JOIN vehicles v ON v.id = t.vehicle_id
            WHERE t.end_time IS NULL
            ORDER BY t.start_time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    /// Viajes de un vehículo, el más reciente primero
    pub async fn find_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE vehicle_id = $1 ORDER BY start_time DESC",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    /// Viajes completados con usuario y vehículo, para el reporte
    pub async fn find_completed(&self) -> Result<Vec<CompletedTripRow>, AppError> {
        let trips = sqlx::query_as::<_, CompletedTripRow>(
            r#"
            SELECT t.id AS trip_id, t.request_id, t.user_id, t.vehicle_id,
                   u.username, v.license_plate, v.make, v.model,
                   t.destination, t.reason, t.start_time, t.end_time,
                   t.start_odometer, t.end_odometer, t.km_traveled
            FROM trips t
            JOIN users u ON u.id = t.user_id
            JOIN vehicles v ON v.id = t.vehicle_id
            WHERE t.end_time IS NOT NULL
            ORDER BY t.start_time ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(trip)
    }

    pub async fn insert(conn: &mut PgConnection, trip: &Trip) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO trips (
                id, request_id, user_id, vehicle_id, destination, reason,
                start_time, end_time, start_odometer, end_odometer, km_traveled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(trip.id)
        .bind(trip.request_id)
        .bind(trip.user_id)
        .bind(trip.vehicle_id)
        .bind(&trip.destination)
        .bind(&trip.reason)
        .bind(trip.start_time)
        .bind(trip.end_time)
        .bind(trip.start_odometer)
        .bind(trip.end_odometer)
        .bind(trip.km_traveled)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Cerrar un viaje activo. Devuelve `false` si ya estaba cerrado.
    pub async fn complete_if_active(conn: &mut PgConnection, trip: &Trip) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE trips
            SET end_time = $2, end_odometer = $3, km_traveled = $4
            WHERE id = $1 AND end_time IS NULL
            "#,
        )
        .bind(trip.id)
        .bind(trip.end_time)
        .bind(trip.end_odometer)
        .bind(trip.km_traveled)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
