use axum::Router;

pub mod catalog;
pub mod categories;
pub mod products;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/productos", products::router())
        .nest("/categorias", categories::router())
}
