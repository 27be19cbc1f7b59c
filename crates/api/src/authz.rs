use axum::response::Response;

use stockroom_auth::{self as auth, UserRole};

use crate::app::errors;
use crate::context::CurrentUser;

pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Administrador];
pub const EMPLOYEE_OR_ADMIN: &[UserRole] = &[UserRole::Empleado, UserRole::Administrador];

/// Gate a handler on the caller's role. The error is a ready-to-return
/// envelope response (403).
pub fn require_role(user: &CurrentUser, allowed: &[UserRole]) -> Result<(), Response> {
    auth::require_role(user.role(), allowed).map_err(errors::domain_error_to_response)
}
