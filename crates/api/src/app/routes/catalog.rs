//! Public catalog: no authentication, active products only.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::get,
};

use stockroom_catalog::{CatalogView, query};
use stockroom_core::ProductId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(public_catalog))
        .route("/:id", get(public_product))
}

pub async fn public_catalog(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::CatalogQueryParams>,
) -> axum::response::Response {
    let (filter, sort, page_req) = params.into_query(CatalogView::Public);

    let snapshot = match services.products.find_active(true).await {
        Ok(rows) => rows,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let page = query(CatalogView::Public, snapshot, &filter, sort, page_req);
    let message = if page.total == 0 {
        "No hay productos disponibles actualmente."
    } else {
        "Catálogo obtenido correctamente."
    };
    errors::json_ok(StatusCode::OK, dto::catalog_page_to_json(&page), message)
}

pub async fn public_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<ProductId>() else {
        return errors::json_error(StatusCode::BAD_REQUEST, "ID de producto inválido.");
    };

    match services.products.find_by_id(id).await {
        Ok(Some(p)) if p.active => errors::json_ok(
            StatusCode::OK,
            dto::product_to_json(&p),
            "Producto obtenido correctamente.",
        ),
        // Absent and inactive are indistinguishable from outside.
        Ok(_) => errors::json_error(StatusCode::NOT_FOUND, "Este producto ya no está disponible."),
        Err(e) => errors::domain_error_to_response(e),
    }
}
