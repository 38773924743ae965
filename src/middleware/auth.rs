//! Middleware de autenticación JWT
//!
//! Extrae la identidad del llamador del header Authorization. El núcleo
//! confía en esta identidad y aplica sus propios permisos por operación.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::{
    models::IdentityContext,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, identity_from_claims, verify_token},
    },
};

/// Usuario autenticado que se inyecta en los handlers
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub IdentityContext);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

        let token = extract_token_from_header(auth_header)?;
        let claims = verify_token(token, &state.jwt)?;
        let identity = identity_from_claims(claims)?;

        tracing::debug!("🔐 {} autenticado como {}", identity.username, identity.role.as_str());
        Ok(AuthenticatedUser(identity))
    }
}
