//! Repositorios
//!
//! Consultas SQLx por tabla. Las lecturas usan el pool; las escrituras
//! reciben una conexión para ejecutarse dentro de la transacción del llamador.

pub mod incident_repository;
pub mod request_repository;
pub mod trip_repository;
pub mod user_repository;
pub mod vehicle_log_repository;
pub mod vehicle_repository;

pub use incident_repository::IncidentRepository;
pub use request_repository::RequestRepository;
pub use trip_repository::TripRepository;
pub use user_repository::UserRepository;
pub use vehicle_log_repository::VehicleLogRepository;
pub use vehicle_repository::VehicleRepository;
