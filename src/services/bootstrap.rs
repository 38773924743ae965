//! Usuarios iniciales
//!
//! Crea el administrador y el auditor por defecto si todavía no existen.
//! Es idempotente: en cada arranque sólo inserta los que falten.

use bcrypt::{hash, DEFAULT_COST};
use tracing::{debug, info};

use crate::config::environment::{EnvironmentConfig, SeedUser};
use crate::models::UserRole;
use crate::repositories::UserRepository;
use crate::utils::errors::{AppError, AppResult};

pub async fn seed_users(users: &UserRepository, config: &EnvironmentConfig) -> AppResult<()> {
    seed_user(users, &config.seed_admin, UserRole::Admin).await?;
    seed_user(users, &config.seed_worker, UserRole::Worker).await?;
    Ok(())
}

async fn seed_user(users: &UserRepository, seed: &SeedUser, role: UserRole) -> AppResult<()> {
    if users.username_exists(&seed.username).await? {
        debug!("👤 Usuario {} ya existe", seed.username);
        return Ok(());
    }

    let password_hash = hash(&seed.password, DEFAULT_COST)
        .map_err(|e| AppError::Hash(format!("Error generando hash: {}", e)))?;
    if users.insert_if_absent(&seed.username, &password_hash, role).await? {
        info!("👤 Usuario inicial {} creado ({})", seed.username, role.as_str());
    }
    Ok(())
}
