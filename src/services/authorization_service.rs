use crate::models::{IdentityContext, UserRole};
use crate::utils::errors::{forbidden_error, AppError};

/// Categorías de permiso de las operaciones del núcleo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    AdminOnly,
    WorkerOnly,
    AnyUser,
}

impl Capability {
    /// Verifica si un rol satisface la categoría
    pub fn allows(&self, role: UserRole) -> bool {
        match self {
            Capability::AdminOnly => role == UserRole::Admin,
            Capability::WorkerOnly => role == UserRole::Worker,
            Capability::AnyUser => true,
        }
    }
}

/// Predicado único de autorización, evaluado antes de cualquier mutación.
/// `operation` completa el mensaje "No tienes permiso para ...".
pub fn authorize(
    identity: &IdentityContext,
    capability: Capability,
    operation: &str,
) -> Result<(), AppError> {
    if capability.allows(identity.role) {
        Ok(())
    } else {
        tracing::warn!(
            "🚫 {} ({}) sin permiso para {}",
            identity.username,
            identity.role.as_str(),
            operation
        );
        Err(forbidden_error(operation))
    }
}
