//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! al schema PostgreSQL de la flota.

pub mod incident;
pub mod report;
pub mod trip;
pub mod user;
pub mod vehicle;
pub mod vehicle_log;
pub mod vehicle_request;

pub use incident::{IncidentReport, IncidentStatus};
pub use report::TripReportRow;
pub use trip::Trip;
pub use user::{IdentityContext, User, UserRole};
pub use vehicle::{Vehicle, VehicleStatus};
pub use vehicle_log::{LogEvent, VehicleLog};
pub use vehicle_request::{RequestStatus, VehicleRequest};
