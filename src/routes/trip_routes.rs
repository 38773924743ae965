use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{CompleteTripRequest, TripDetailsResponse};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::Trip;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_trip))
        .route("/:id/complete", post(complete_trip))
}

async fn get_trip(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TripDetailsResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let details = controller.details(&identity, id).await?;
    Ok(Json(ApiResponse::success(details)))
}

async fn complete_trip(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteTripRequest>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = TripController::new(state.pool.clone());
    let trip = controller.complete(&identity, id, request).await?;
    Ok(Json(ApiResponse::success_with_message(trip, "Viaje completado")))
}
