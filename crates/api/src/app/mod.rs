//! HTTP application wiring (axum router + service construction).
//!
//! Folder structure:
//! - `services.rs`: explicit dependency wiring (stores, image store) and the
//!   product orchestration that spans them
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs, lenient query-parameter parsing, JSON mapping
//! - `errors.rs`: the uniform response envelope

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(jwt_secret: String, images_dir: PathBuf) -> Router {
    let jwt = Arc::new(stockroom_auth::Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let auth_state = middleware::AuthState { jwt };

    let services = Arc::new(services::AppServices::in_memory(images_dir));
    if let Err(e) = services.images.ensure_dir().await {
        tracing::warn!(error = %e, "could not create images directory");
    }

    // Public routes: health probe + read-only catalog.
    let public = Router::new()
        .route("/health", get(routes::system::health))
        .nest("/catalogo", routes::catalog::router())
        .layer(Extension(services.clone()));

    // Protected routes: token + active account required.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    public.merge(protected).layer(ServiceBuilder::new())
}
