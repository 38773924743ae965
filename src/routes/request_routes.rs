use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::request_controller::RequestController;
use crate::dto::request_dto::CreateVehicleRequestBody;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::{Trip, VehicleRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_request_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_request))
        .route("/:id/approve", post(approve_request))
        .route("/:id/reject", post(reject_request))
}

async fn create_request(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Json(body): Json<CreateVehicleRequestBody>,
) -> Result<(StatusCode, Json<ApiResponse<VehicleRequest>>), AppError> {
    let controller = RequestController::new(state.pool.clone());
    let request = controller.create(&identity, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(request, "Solicitud enviada")),
    ))
}

async fn approve_request(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = RequestController::new(state.pool.clone());
    let trip = controller.approve(&identity, id).await?;
    Ok(Json(ApiResponse::success_with_message(trip, "Solicitud aprobada")))
}

async fn reject_request(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<VehicleRequest>>, AppError> {
    let controller = RequestController::new(state.pool.clone());
    let request = controller.reject(&identity, id).await?;
    Ok(Json(ApiResponse::success_with_message(request, "Solicitud rechazada")))
}
