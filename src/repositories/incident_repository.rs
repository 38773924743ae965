use crate::models::incident::IncidentWithDetails;
use crate::models::{IncidentReport, IncidentStatus};
use crate::utils::errors::AppError;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const DETAILS_SELECT: &str = r#"
    SELECT i.id, i.vehicle_id, v.license_plate, i.user_id,
           u.username AS reporter_username, i.report_date, i.incident_type,
           i.description, i.location, i.status
    FROM incident_reports i
    JOIN vehicles v ON v.id = i.vehicle_id
    JOIN users u ON u.id = i.user_id
"#;

pub struct IncidentRepository {
    pool: PgPool,
}

impl IncidentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos los incidentes, el más reciente primero
    pub async fn find_all_with_details(&self) -> Result<Vec<IncidentWithDetails>, AppError> {
        let incidents = sqlx::query_as::<_, IncidentWithDetails>(&format!(
            "{} ORDER BY i.report_date DESC",
            DETAILS_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(incidents)
    }

    pub async fn find_by_status_with_details(
        &self,
        status: IncidentStatus,
    ) -> Result<Vec<IncidentWithDetails>, AppError> {
        let incidents = sqlx::query_as::<_, IncidentWithDetails>(&format!(
            "{} WHERE i.status = $1 ORDER BY i.report_date DESC",
            DETAILS_SELECT
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(incidents)
    }

    pub async fn find_with_details(&self, id: Uuid) -> Result<Option<IncidentWithDetails>, AppError> {
        let incident = sqlx::query_as::<_, IncidentWithDetails>(&format!(
            "{} WHERE i.id = $1",
            DETAILS_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(incident)
    }

    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<IncidentReport>, AppError> {
        let incident = sqlx::query_as::<_, IncidentReport>(
            "SELECT * FROM incident_reports WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(incident)
    }

    pub async fn insert(conn: &mut PgConnection, incident: &IncidentReport) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO incident_reports (
                id, vehicle_id, user_id, report_date, incident_type,
                description, location, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(incident.id)
        .bind(incident.vehicle_id)
        .bind(incident.user_id)
        .bind(incident.report_date)
        .bind(&incident.incident_type)
        .bind(&incident.description)
        .bind(&incident.location)
        .bind(incident.status)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn update_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: IncidentStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE incident_reports SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(conn)
            .await?;

        Ok(())
    }
}
