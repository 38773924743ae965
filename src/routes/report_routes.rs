use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::report_controller::ReportController;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::TripReportRow;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/trips", get(trip_report))
}

async fn trip_report(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<Json<ApiResponse<Vec<TripReportRow>>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let rows = controller.trip_report(&identity).await?;
    Ok(Json(ApiResponse::success(rows)))
}
