//! Routers HTTP
//!
//! Todos los handlers siguen el mismo patrón: extraer identidad y cuerpo,
//! delegar en el controlador y envolver la respuesta en `ApiResponse`.

pub mod auth_routes;
pub mod dashboard_routes;
pub mod incident_routes;
pub mod report_routes;
pub mod request_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::cors_layer;
use crate::state::AppState;

/// Router completo de la aplicación con CORS y trazas
pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/requests", request_routes::create_request_router())
        .nest("/api/trips", trip_routes::create_trip_router())
        .nest("/api/incidents", incident_routes::create_incident_router())
        .nest("/api/reports", report_routes::create_report_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet_tracker",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
