use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, DomainError, DomainResult, ProductId};

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Product record as the catalog sees it: an immutable snapshot row.
///
/// Writes go through the store; within one query the record never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Non-negative, finite. Stored as DECIMAL upstream; compared with
    /// `total_cmp` when sorting.
    pub price: f64,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub is_promotion: bool,
    pub active: bool,
    pub description: Option<String>,
    /// Always non-empty; the store assigns the default image when the caller
    /// supplies none.
    pub image_url: String,
    /// Weak reference: the category may be looked up, but its absence does
    /// not invalidate the product.
    pub category_id: Option<CategoryId>,
}

impl Product {
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.name, self.price, self.current_stock, self.minimum_stock)
    }
}

/// A product payload that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub current_stock: u32,
    pub minimum_stock: u32,
    pub is_promotion: bool,
    pub active: bool,
    pub description: Option<String>,
    pub image_url: String,
    pub category_id: Option<CategoryId>,
}

impl NewProduct {
    pub fn validate(&self) -> DomainResult<()> {
        validate_fields(&self.name, self.price, self.current_stock, self.minimum_stock)
    }

    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            current_stock: self.current_stock,
            minimum_stock: self.minimum_stock,
            is_promotion: self.is_promotion,
            active: self.active,
            description: self.description,
            image_url: self.image_url,
            category_id: self.category_id,
        }
    }
}

fn validate_fields(
    name: &str,
    price: f64,
    current_stock: u32,
    minimum_stock: u32,
) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("nombre es obligatorio."));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            "nombre no debe exceder 100 caracteres.",
        ));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::validation(
            "precio debe ser mayor o igual a 0.",
        ));
    }
    if current_stock < minimum_stock {
        return Err(DomainError::validation(
            "stockActual no puede ser menor que stockMinimo.",
        ));
    }
    Ok(())
}
