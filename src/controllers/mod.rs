//! Controladores
//!
//! Cada operación: autorizar → abrir transacción → leer con bloqueo →
//! transición pura → persistir → confirmar. Si algo falla antes del
//! `commit`, la transacción se descarta y se revierte completa.

pub mod auth_controller;
pub mod dashboard_controller;
pub mod incident_controller;
pub mod report_controller;
pub mod request_controller;
pub mod trip_controller;
pub mod vehicle_controller;

use sqlx::PgConnection;

use crate::repositories::{VehicleLogRepository, VehicleRepository};
use crate::services::vehicle_registry::StatusChange;
use crate::utils::errors::AppError;

/// Persistir un cambio de estado junto con su entrada de bitácora
pub(crate) async fn persist_status_change(
    conn: &mut PgConnection,
    change: &StatusChange,
) -> Result<(), AppError> {
    VehicleRepository::update_state(&mut *conn, &change.vehicle).await?;
    VehicleLogRepository::append(&mut *conn, &change.log).await?;
    Ok(())
}
