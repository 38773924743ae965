use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::incident_controller::IncidentController;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::incident::IncidentWithDetails;
use crate::models::{IncidentReport, IncidentStatus};
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct IncidentFilter {
    pub status: Option<IncidentStatus>,
}

pub fn create_incident_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_incidents))
        .route("/:id", get(get_incident))
        .route("/:id/resolve", post(resolve_incident))
}

async fn list_incidents(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(filter): Query<IncidentFilter>,
) -> Result<Json<ApiResponse<Vec<IncidentWithDetails>>>, AppError> {
    let controller = IncidentController::new(state.pool.clone());
    let incidents = controller.list(&identity, filter.status).await?;
    Ok(Json(ApiResponse::success(incidents)))
}

async fn get_incident(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IncidentWithDetails>>, AppError> {
    let controller = IncidentController::new(state.pool.clone());
    let incident = controller.details(&identity, id).await?;
    Ok(Json(ApiResponse::success(incident)))
}

async fn resolve_incident(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<IncidentReport>>, AppError> {
    let controller = IncidentController::new(state.pool.clone());
    let incident = controller.resolve(&identity, id).await?;
    Ok(Json(ApiResponse::success_with_message(incident, "Incidente resuelto")))
}
