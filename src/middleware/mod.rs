//! Middleware del sistema
//!
//! Este módulo contiene la extracción de identidad y CORS.

pub mod auth;
pub mod cors;

pub use auth::AuthenticatedUser;
pub use cors::cors_layer;
