//! Fleet Tracker
//!
//! Seguimiento de una flotilla de vehículos de una organización: solicitudes,
//! viajes, incidentes, mantenimiento y bitácora de auditoría.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
