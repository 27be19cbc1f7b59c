use serde::{Deserialize, Deserializer};
use serde_json::json;

use stockroom_catalog::{
    Category, CatalogFilter, CatalogPage, CatalogView, NewProduct, PageRequest, Product,
    SortDirection, SortKey, SortSpec,
};
use stockroom_core::{CategoryId, DomainError, DomainResult};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
    #[serde(rename = "stockActual")]
    pub stock_actual: Option<i64>,
    #[serde(rename = "stockMinimo")]
    pub stock_minimo: Option<i64>,
    #[serde(rename = "esPromocion")]
    pub es_promocion: Option<bool>,
    pub activo: Option<bool>,
    pub descripcion: Option<String>,
    #[serde(rename = "urlImagen")]
    pub url_imagen: Option<String>,
    #[serde(rename = "idCategoria")]
    pub id_categoria: Option<u32>,
}

impl CreateProductRequest {
    /// Validate required fields and shape a draft. Missing fields are
    /// reported together, by wire name. An absent image reference gets the
    /// default image.
    pub fn into_draft(self) -> DomainResult<NewProduct> {
        let mut missing = Vec::new();
        if self.nombre.is_none() {
            missing.push("nombre");
        }
        if self.precio.is_none() {
            missing.push("precio");
        }
        if self.stock_actual.is_none() {
            missing.push("stockActual");
        }
        if self.stock_minimo.is_none() {
            missing.push("stockMinimo");
        }
        if self.activo.is_none() {
            missing.push("activo");
        }
        if !missing.is_empty() {
            return Err(DomainError::validation(format!(
                "Faltan campos obligatorios: {}.",
                missing.join(", ")
            )));
        }

        let draft = NewProduct {
            name: self.nombre.unwrap_or_default(),
            price: self.precio.unwrap_or_default(),
            current_stock: stock_value(self.stock_actual.unwrap_or_default(), "stockActual")?,
            minimum_stock: stock_value(self.stock_minimo.unwrap_or_default(), "stockMinimo")?,
            is_promotion: self.es_promocion.unwrap_or(false),
            active: self.activo.unwrap_or_default(),
            description: self.descripcion,
            image_url: self
                .url_imagen
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| stockroom_media::DEFAULT_IMAGE_URL.to_string()),
            category_id: self.id_categoria.map(CategoryId::new),
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub nombre: Option<String>,
    pub precio: Option<f64>,
    #[serde(rename = "stockActual")]
    pub stock_actual: Option<i64>,
    #[serde(rename = "stockMinimo")]
    pub stock_minimo: Option<i64>,
    #[serde(rename = "esPromocion")]
    pub es_promocion: Option<bool>,
    pub activo: Option<bool>,
    /// Double-wrapped so an explicit JSON `null` (clear the description) is
    /// distinguishable from an absent field (keep it).
    #[serde(default, deserialize_with = "double_option")]
    pub descripcion: Option<Option<String>>,
    #[serde(rename = "urlImagen")]
    pub url_imagen: Option<String>,
    #[serde(rename = "idCategoria")]
    pub id_categoria: Option<u32>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl UpdateProductRequest {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.precio.is_none()
            && self.stock_actual.is_none()
            && self.stock_minimo.is_none()
            && self.es_promocion.is_none()
            && self.activo.is_none()
            && self.descripcion.is_none()
            && self.url_imagen.is_none()
            && self.id_categoria.is_none()
    }

    /// Merge the patch over an existing record; absent fields stay unchanged.
    /// The merged record is re-validated by the caller.
    pub fn apply_to(self, mut product: Product) -> DomainResult<Product> {
        if let Some(nombre) = self.nombre {
            product.name = nombre;
        }
        if let Some(precio) = self.precio {
            product.price = precio;
        }
        if let Some(stock) = self.stock_actual {
            product.current_stock = stock_value(stock, "stockActual")?;
        }
        if let Some(stock) = self.stock_minimo {
            product.minimum_stock = stock_value(stock, "stockMinimo")?;
        }
        if let Some(promo) = self.es_promocion {
            product.is_promotion = promo;
        }
        if let Some(activo) = self.activo {
            product.active = activo;
        }
        if let Some(descripcion) = self.descripcion {
            product.description = descripcion;
        }
        if let Some(url) = self.url_imagen {
            product.image_url = url;
        }
        if let Some(id) = self.id_categoria {
            product.category_id = Some(CategoryId::new(id));
        }
        Ok(product)
    }
}

fn stock_value(raw: i64, field: &str) -> DomainResult<u32> {
    if raw < 0 {
        return Err(DomainError::validation(format!(
            "{field} debe ser mayor o igual a 0."
        )));
    }
    u32::try_from(raw)
        .map_err(|_| DomainError::validation(format!("{field} fuera de rango.")))
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    #[serde(rename = "cantidadCambio")]
    pub cantidad_cambio: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub nombre: Option<String>,
}

impl CategoryRequest {
    pub fn name(self) -> DomainResult<String> {
        let name = self
            .nombre
            .ok_or_else(|| DomainError::validation("nombre es obligatorio."))?;
        stockroom_catalog::category::validate_name(&name)?;
        Ok(name)
    }
}

// -------------------------
// Catalog query parameters
// -------------------------

/// Raw query parameters, as strings.
///
/// Parsing is deliberately lenient: malformed or out-of-range raw values are
/// discarded (the filter is simply absent), never a 400.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQueryParams {
    pub nombre: Option<String>,
    pub categoria: Option<String>,
    pub activo: Option<String>,
    #[serde(rename = "esPromocion")]
    pub es_promocion: Option<String>,
    #[serde(rename = "precioMin")]
    pub precio_min: Option<String>,
    #[serde(rename = "precioMax")]
    pub precio_max: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "ordenarPor")]
    pub ordenar_por: Option<String>,
    pub orden: Option<String>,
}

impl CatalogQueryParams {
    pub fn into_query(self, view: CatalogView) -> (CatalogFilter, SortSpec, PageRequest) {
        let employee = view == CatalogView::Employee;

        let filter = CatalogFilter {
            name: if employee {
                self.nombre.filter(|n| !n.trim().is_empty())
            } else {
                None
            },
            category_id: self
                .categoria
                .and_then(|s| s.parse::<u32>().ok())
                .map(CategoryId::new),
            active: if employee {
                self.activo.as_deref().and_then(parse_bool_param)
            } else {
                None
            },
            is_promotion: self.es_promocion.as_deref().and_then(parse_bool_param),
            price_min: parse_price(self.precio_min),
            price_max: parse_price(self.precio_max),
        };

        let sort = SortSpec {
            key: self
                .ordenar_por
                .as_deref()
                .and_then(SortKey::parse)
                .filter(|k| view.allows_sort(*k))
                .unwrap_or_default(),
            direction: self
                .orden
                .as_deref()
                .and_then(SortDirection::parse)
                .unwrap_or_default(),
        };

        let page = PageRequest::new(
            view,
            self.page.and_then(|s| s.parse::<u32>().ok()),
            self.limit.and_then(|s| s.parse::<u32>().ok()),
        );

        (filter, sort, page)
    }
}

fn parse_bool_param(s: &str) -> Option<bool> {
    match s {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_price(raw: Option<String>) -> Option<f64> {
    raw.and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn product_to_json(p: &Product) -> serde_json::Value {
    json!({
        "idProducto": p.id.value(),
        "nombre": p.name,
        "precio": p.price,
        "stockActual": p.current_stock,
        "stockMinimo": p.minimum_stock,
        "esPromocion": p.is_promotion,
        "activo": p.active,
        "descripcion": p.description,
        "urlImagen": p.image_url,
        "idCategoria": p.category_id.map(|c| c.value()),
    })
}

pub fn category_to_json(c: &Category) -> serde_json::Value {
    json!({
        "idCategoria": c.id.value(),
        "nombre": c.name,
    })
}

pub fn catalog_page_to_json(page: &CatalogPage) -> serde_json::Value {
    json!({
        "productos": page.items.iter().map(product_to_json).collect::<Vec<_>>(),
        "total": page.total,
        "pagina": page.page,
        "totalPaginas": page.total_pages,
    })
}
