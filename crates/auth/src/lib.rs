//! `stockroom-auth` — authentication/authorization boundary.
//!
//! Token decoding lives behind the [`JwtValidator`] trait; role checks are
//! pure functions. This crate knows nothing about HTTP or storage.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod roles;

pub use authorize::{require_active, require_role};
pub use claims::Claims;
pub use jwt::{Hs256JwtValidator, JwtValidator, TokenError};
pub use roles::UserRole;
