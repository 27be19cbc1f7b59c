use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Extension, Multipart, Path, Query, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, patch, post},
};

use stockroom_catalog::{CatalogView, query};
use stockroom_core::ProductId;
use stockroom_media::MAX_IMAGE_SIZE_BYTES;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz::{self, ADMIN_ONLY, EMPLOYEE_OR_ADMIN};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/:id/stock", patch(adjust_stock))
        .route(
            "/:id/imagen",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE_BYTES + 64 * 1024)),
        )
}

fn parse_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse::<ProductId>().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "id inválido o no proporcionado.")
    })
}

fn parse_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(errors::json_error(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
        )),
    }
}

/// Employee catalog: all products, full filter and sort set.
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<dto::CatalogQueryParams>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, EMPLOYEE_OR_ADMIN) {
        return resp;
    }
    let (filter, sort, page_req) = params.into_query(CatalogView::Employee);

    let snapshot = match services.products.find_all().await {
        Ok(rows) => rows,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let page = query(CatalogView::Employee, snapshot, &filter, sort, page_req);
    errors::json_ok(
        StatusCode::OK,
        dto::catalog_page_to_json(&page),
        "Productos obtenidos correctamente.",
    )
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, EMPLOYEE_OR_ADMIN) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.products.find_by_id(id).await {
        Ok(Some(p)) => errors::json_ok(
            StatusCode::OK,
            dto::product_to_json(&p),
            "Producto obtenido correctamente.",
        ),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "Producto no encontrado."),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<dto::CreateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, ADMIN_ONLY) {
        return resp;
    }
    let body = match parse_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let draft = match body.into_draft() {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.create_product(draft).await {
        Ok(p) => {
            tracing::info!(
                product_id = p.id.value(),
                user_id = user.user_id(),
                role = %user.role(),
                "product created"
            );
            errors::json_ok(
                StatusCode::CREATED,
                dto::product_to_json(&p),
                "Producto creado correctamente.",
            )
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateProductRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, ADMIN_ONLY) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let patch = match parse_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    if patch.is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "No hay cambios para aplicar.");
    }

    let existing = match services.products.find_by_id(id).await {
        Ok(Some(p)) => p,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "Producto no encontrado."),
        Err(e) => return errors::domain_error_to_response(e),
    };
    let merged = match patch.apply_to(existing) {
        Ok(m) => m,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.update_product(merged).await {
        Ok(p) => errors::json_ok(
            StatusCode::OK,
            dto::product_to_json(&p),
            "Producto actualizado correctamente.",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, ADMIN_ONLY) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.delete_product(id).await {
        Ok(()) => {
            tracing::info!(
                product_id = id.value(),
                user_id = user.user_id(),
                role = %user.role(),
                "product deleted"
            );
            errors::json_ok(
                StatusCode::OK,
                serde_json::Value::Null,
                "Producto eliminado correctamente.",
            )
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Result<Json<dto::AdjustStockRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, EMPLOYEE_OR_ADMIN) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let body = match parse_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let Some(delta) = body.cantidad_cambio else {
        return errors::json_error(StatusCode::BAD_REQUEST, "cantidadCambio es obligatorio.");
    };

    match services.products.adjust_stock(id, delta).await {
        Ok(p) => errors::json_ok(
            StatusCode::OK,
            dto::product_to_json(&p),
            format!(
                "Stock actualizado correctamente. Nuevo stock: {}",
                p.current_stock
            ),
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Multipart upload, single `imagen` field.
pub async fn upload_image(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, ADMIN_ONLY) {
        return resp;
    }
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut upload: Option<(String, Vec<u8>)> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("imagen") => {
                let mime = field.content_type().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => upload = Some((mime, bytes.to_vec())),
                    Err(_) => {
                        return errors::json_error(
                            StatusCode::BAD_REQUEST,
                            "No se pudo leer el archivo enviado.",
                        );
                    }
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "No se pudo leer el archivo enviado.",
                );
            }
        }
    }

    let Some((mime, bytes)) = upload else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "No se proporcionó ninguna imagen.",
        );
    };

    match services.attach_image(id, &mime, &bytes).await {
        Ok(p) => {
            tracing::info!(
                product_id = p.id.value(),
                user_id = user.user_id(),
                role = %user.role(),
                "image replaced"
            );
            errors::json_ok(
                StatusCode::OK,
                dto::product_to_json(&p),
                "Imagen actualizada correctamente.",
            )
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
