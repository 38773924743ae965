use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::incident_controller::IncidentController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::incident_dto::ReportIncidentRequest;
use crate::dto::vehicle_dto::{CreateVehicleRequest, VehicleDetailsResponse};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::{IncidentReport, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/maintenance", post(mark_maintenance))
        .route("/:id/release", post(release_maintenance))
        .route("/:id/incidents", post(report_incident))
}

async fn create_vehicle(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Vehicle>>), AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.create(&identity, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(vehicle, "Vehículo añadido exitosamente")),
    ))
}

async fn list_vehicles(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let vehicles = controller.list(&identity).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn get_vehicle(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleDetailsResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let details = controller.details(&identity, id).await?;
    Ok(Json(ApiResponse::success(details)))
}

async fn mark_maintenance(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.mark_maintenance(&identity, id).await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle,
        "Vehículo marcado en mantenimiento",
    )))
}

async fn release_maintenance(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let vehicle = controller.release_maintenance(&identity, id).await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle,
        "Vehículo disponible nuevamente",
    )))
}

async fn report_incident(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ReportIncidentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<IncidentReport>>), AppError> {
    let controller = IncidentController::new(state.pool.clone());
    let incident = controller.report(&identity, id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(incident, "Incidente reportado")),
    ))
}
