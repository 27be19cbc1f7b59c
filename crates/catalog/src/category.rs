use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, DomainError, DomainResult};

use crate::product::MAX_NAME_LEN;

/// Product category. Flat: no nesting beyond the weak back-reference from
/// `Product::category_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Validate a category name (shared by create and rename).
pub fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("nombre es obligatorio."));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            "nombre no debe exceder 100 caracteres.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_name() {
        assert!(validate_name("Bebidas").is_ok());
    }

    #[test]
    fn rejects_empty_and_whitespace_names() {
        assert!(validate_name("").is_err());
        assert!(validate_name("  \t").is_err());
    }

    #[test]
    fn rejects_name_over_limit() {
        assert!(validate_name(&"x".repeat(101)).is_err());
        assert!(validate_name(&"x".repeat(100)).is_ok());
    }
}
