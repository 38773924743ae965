//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables
//! tienen un valor por defecto salvo `JWT_SECRET`.

use anyhow::{anyhow, Context, Result};
use std::env;

/// Vida máxima de un token: 30 días
pub const MAX_JWT_EXPIRATION: u64 = 30 * 24 * 60 * 60;

/// Credenciales de un usuario semilla
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub seed_admin: SeedUser,
    pub seed_worker: SeedUser,
}

impl EnvironmentConfig {
    /// Leer la configuración desde el entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde cualquier fuente clave → valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("JWT_SECRET must be set"))?;

        let jwt_expiration: u64 = var_or("JWT_EXPIRATION", "28800")
            .parse()
            .context("JWT_EXPIRATION must be a valid number")?;
        if jwt_expiration == 0 || jwt_expiration > MAX_JWT_EXPIRATION {
            return Err(anyhow!(
                "JWT_EXPIRATION must be between 1 and {} seconds",
                MAX_JWT_EXPIRATION
            ));
        }

        Ok(Self {
            environment: var_or("ENVIRONMENT", "development"),
            port: var_or("PORT", "5015")
                .parse()
                .context("PORT must be a valid number")?,
            host: var_or("HOST", "0.0.0.0"),
            jwt_secret,
            jwt_expiration,
            cors_origins: var_or("CORS_ORIGINS", "")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            seed_admin: SeedUser {
                username: var_or("SEED_ADMIN_USERNAME", "admin"),
                password: var_or("SEED_ADMIN_PASSWORD", "admin123"),
            },
            seed_worker: SeedUser {
                username: var_or("SEED_WORKER_USERNAME", "auditor1"),
                password: var_or("SEED_WORKER_PASSWORD", "auditor123"),
            },
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert!(config.is_development());
        assert_eq!(config.server_url(), "0.0.0.0:5015");
        assert_eq!(config.jwt_expiration, 28800);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.seed_admin.username, "admin");
        assert_eq!(config.seed_worker.username, "auditor1");
    }

    #[test]
    fn test_missing_secret_is_an_error() {
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[("JWT_SECRET", "  ")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("CORS_ORIGINS", "https://flota.example, https://admin.example"),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cors_origins,
            vec!["https://flota.example", "https://admin.example"]
        );
    }

    #[test]
    fn test_jwt_expiration_bounds() {
        for value in ["0", "10000000000000", "18446744073709551615"] {
            let result = EnvironmentConfig::from_lookup(lookup_from(&[
                ("JWT_SECRET", "s3cret"),
                ("JWT_EXPIRATION", value),
            ]));
            assert!(result.is_err(), "JWT_EXPIRATION={} debería rechazarse", value);
        }

        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_EXPIRATION", "2592000"),
        ]))
        .unwrap();
        assert_eq!(config.jwt_expiration, MAX_JWT_EXPIRATION);
    }

    #[test]
    fn test_invalid_port() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s3cret"),
            ("PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }
}
