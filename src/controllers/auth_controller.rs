use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::models::IdentityContext;
use crate::repositories::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::verify;
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

pub const INVALID_CREDENTIALS: &str = "Usuario o contraseña incorrectos.";

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let Some(user) = self.repository.find_by_username(request.username.trim()).await? else {
            warn!("🔒 Login fallido: usuario {} desconocido", request.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;
        if !valid {
            warn!("🔒 Login fallido: contraseña incorrecta para {}", user.username);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let identity = IdentityContext::from(&user);
        let token = generate_token(&identity, &self.jwt)?;
        info!("🔑 {} inició sesión ({})", identity.username, identity.role.as_str());

        Ok(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            user: identity,
        })
    }
}
