//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: service wiring (catalog, wishlists, contact inbox)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use carmarket_infra::config::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Router {
    let services = Arc::new(services::build_services(config));
    build_app_with(services, config.admin_token.clone())
}

/// Build the router around existing services (tests seed data through these).
pub fn build_app_with(services: Arc<services::AppServices>, admin_token: Option<String>) -> Router {
    let admin = middleware::AdminState::new(admin_token);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_log_middleware))
                .layer(Extension(services))
                .layer(Extension(admin)),
        )
}
