use crate::models::{Vehicle, VehicleStatus};
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY license_plate")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    pub async fn find_by_status(&self, status: VehicleStatus) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE status = $1 ORDER BY license_plate",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    /// Leer el vehículo bloqueando la fila hasta el fin de la transacción
    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(vehicle)
    }

    pub async fn license_plate_exists(conn: &mut PgConnection, license_plate: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1)",
        )
        .bind(license_plate)
        .fetch_one(conn)
        .await?;

        Ok(result.0)
    }

    pub async fn insert(conn: &mut PgConnection, vehicle: &Vehicle) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (id, license_plate, make, model, status, current_odometer, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(vehicle.id)
        .bind(&vehicle.license_plate)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.status)
        .bind(vehicle.current_odometer)
        .bind(vehicle.created_at)
        .execute(conn)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::DuplicatePlate(format!(
                "Ya existe un vehículo con la placa {}.",
                vehicle.license_plate
            )),
            other => AppError::Database(other),
        })?;

        Ok(())
    }

    /// Persistir estado y odómetro
    pub async fn update_state(conn: &mut PgConnection, vehicle: &Vehicle) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE vehicles SET status = $2, current_odometer = $3 WHERE id = $1",
        )
        .bind(vehicle.id)
        .bind(vehicle.status)
        .bind(vehicle.current_odometer)
        .execute(conn)
        .await?;

        if result.rows_affected() != 1 {
            return Err(AppError::NotFound("Vehículo no encontrado.".to_string()));
        }
        Ok(())
    }
}
