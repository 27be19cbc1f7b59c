use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde_json::json;

use stockroom_core::CategoryId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz::{self, ADMIN_ONLY, EMPLOYEE_OR_ADMIN};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route(
            "/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
}

fn parse_id(raw: &str) -> Result<CategoryId, axum::response::Response> {
    raw.parse::<CategoryId>().map_err(|_| {
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

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, EMPLOYEE_OR_ADMIN) {
        return resp;
    }

    match services.categories.find_all().await {
        Ok(rows) => errors::json_ok(
            StatusCode::OK,
            json!({
                "categorias": rows.iter().map(dto::category_to_json).collect::<Vec<_>>(),
                "total": rows.len(),
            }),
            "Categorías obtenidas correctamente.",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_category(
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

    match services.categories.find_by_id(id).await {
        Ok(Some(c)) => errors::json_ok(
            StatusCode::OK,
            dto::category_to_json(&c),
            "Categoría obtenida correctamente.",
        ),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "Categoría no encontrada."),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    body: Result<Json<dto::CategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, ADMIN_ONLY) {
        return resp;
    }
    let body = match parse_body(body) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let name = match body.name() {
        Ok(name) => name,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.categories.insert(name).await {
        Ok(c) => errors::json_ok(
            StatusCode::CREATED,
            dto::category_to_json(&c),
            "Categoría creada correctamente.",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    body: Result<Json<dto::CategoryRequest>, JsonRejection>,
) -> axum::response::Response {
    if let Err(resp) = authz::require_role(&user, ADMIN_ONLY) {
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
    let name = match body.name() {
        Ok(name) => name,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.categories.rename(id, name).await {
        Ok(c) => errors::json_ok(
            StatusCode::OK,
            dto::category_to_json(&c),
            "Categoría actualizada correctamente.",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_category(
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

    match services.categories.delete(id).await {
        Ok(()) => errors::json_ok(
            StatusCode::OK,
            serde_json::Value::Null,
            "Categoría eliminada correctamente.",
        ),
        Err(e) => errors::domain_error_to_response(e),
    }
}
