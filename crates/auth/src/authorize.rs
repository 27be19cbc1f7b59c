//! Pure authorization checks.
//!
//! - No IO
//! - No panics
//! - No business logic (policy only)

use stockroom_core::{DomainError, DomainResult};

use crate::roles::UserRole;

/// Reject inactive accounts. Inactive users keep valid tokens but lose access
/// to every protected route.
pub fn require_active(active: bool) -> DomainResult<()> {
    if active {
        Ok(())
    } else {
        Err(DomainError::forbidden("Usuario no activo."))
    }
}

/// Allow only the listed roles.
pub fn require_role(role: UserRole, allowed: &[UserRole]) -> DomainResult<()> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            "No tiene permisos para esta operación.",
        ))
    }
}
