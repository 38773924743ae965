//! Services module
//!
//! Lógica de negocio. Las transiciones de estado son funciones puras que
//! reciben el instante `now` y devuelven el conjunto de cambios a persistir;
//! los controladores se encargan de la transacción.

pub mod authorization_service;
pub mod bootstrap;
pub mod incident_workflow;
pub mod report_aggregator;
pub mod request_workflow;
pub mod trip_lifecycle;
pub mod vehicle_registry;
