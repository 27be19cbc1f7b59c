use serde::{Deserialize, Serialize};

use crate::roles::UserRole;

/// Access-token claims (transport-agnostic).
///
/// This is the minimal claim set the API expects once a token has been
/// decoded and signature-verified. Field names follow the original wire
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user identifier.
    pub sub: u32,

    /// Role granted to the account.
    #[serde(rename = "tipoUsuario")]
    pub tipo_usuario: UserRole,

    /// Whether the account is active. Inactive accounts authenticate but are
    /// forbidden from every protected route.
    pub activo: bool,

    /// Issued-at, seconds since the epoch.
    pub iat: i64,

    /// Expiration, seconds since the epoch. Enforced by the validator.
    pub exp: i64,
}
