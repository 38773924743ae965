use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::dashboard_dto::DashboardResponse;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

async fn dashboard(
    State(state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<Json<ApiResponse<DashboardResponse>>, AppError> {
    let controller = DashboardController::new(state.pool.clone());
    let response = controller.dashboard(&identity).await?;
    Ok(Json(ApiResponse::success(response)))
}
