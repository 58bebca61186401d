use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use carmarket_catalog::NewContactMessage;
use carmarket_core::CarId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::AdminGuard;

/// `POST /api/cars/:id/contact`
pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<NewContactMessage>, JsonRejection>,
) -> axum::response::Response {
    let car_id: CarId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(input) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.contact.submit(car_id, input) {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_for_car(
    _admin: AdminGuard,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let car_id: CarId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.contact.list_for_car(car_id) {
        Ok(messages) => (StatusCode::OK, Json(dto::items_json(&messages))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_messages(
    _admin: AdminGuard,
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.contact.list_all() {
        Ok(messages) => (StatusCode::OK, Json(dto::items_json(&messages))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
