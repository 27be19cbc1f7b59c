//! Stock-delta arithmetic.
//!
//! Pure computation; the store applies the result under its own lock so a
//! concurrent adjustment cannot lose an update or drive stock negative.

use stockroom_core::{DomainError, DomainResult};

/// Compute the stock level after applying `delta` (negative to decrement).
///
/// Rejects any result below zero; the message reports the current stock and
/// the requested magnitude. There is no ceiling beyond the storage type and
/// no minimum-stock alerting here (presentation concern).
pub fn apply_delta(current: u32, delta: i64) -> DomainResult<u32> {
    let updated = i64::from(current)
        .checked_add(delta)
        .ok_or_else(|| DomainError::validation("cantidadCambio fuera de rango."))?;

    if updated < 0 {
        return Err(DomainError::validation(format!(
            "Stock insuficiente. Stock actual: {current}, cantidad solicitada: {}",
            delta.unsigned_abs()
        )));
    }

    u32::try_from(updated)
        .map_err(|_| DomainError::validation("cantidadCambio fuera de rango."))
}
