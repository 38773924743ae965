//! DTOs de la API
//!
//! Cuerpos de entrada (validados con `validator`) y de salida.

pub mod api_response;
pub mod auth_dto;
pub mod dashboard_dto;
pub mod incident_dto;
pub mod request_dto;
pub mod trip_dto;
pub mod vehicle_dto;

pub use api_response::ApiResponse;
