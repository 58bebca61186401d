use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde_json::json;

use carmarket_catalog::{CarFilter, CarInput, CarPatch};
use carmarket_core::CarId;

use crate::app::routes::contact;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::AdminGuard;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/featured", get(list_featured))
        .route("/recent", get(list_recent))
        .route("/:id", get(get_car).patch(update_car).delete(delete_car))
        .route("/:id/similar", get(similar_cars))
        .route(
            "/:id/contact",
            get(contact::list_for_car).post(contact::submit),
        )
}

fn current_year() -> i32 {
    Utc::now().year()
}

/// `GET /api/cars`: every car, or the filtered subset when query parameters are given.
pub async fn list_cars(
    Extension(services): Extension<Arc<AppServices>>,
    filter: Result<Query<CarFilter>, QueryRejection>,
) -> axum::response::Response {
    let Query(filter) = match filter {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };

    let result = if filter.is_empty() {
        services.catalog.list_cars()
    } else {
        services.catalog.filter_cars(&filter)
    };

    match result {
        Ok(cars) => (StatusCode::OK, Json(dto::items_json(&cars))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_featured(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::LimitQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(q) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    match services.catalog.list_featured(q.limit) {
        Ok(cars) => (StatusCode::OK, Json(dto::items_json(&cars))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_recent(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::LimitQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(q) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    match services.catalog.list_recent(q.limit) {
        Ok(cars) => (StatusCode::OK, Json(dto::items_json(&cars))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_car(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CarId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.catalog.get_car(id) {
        Ok(car) => (StatusCode::OK, Json(car)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Unknown ids yield an empty list rather than 404.
pub async fn similar_cars(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    query: Result<Query<dto::LimitQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(q) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    let id: CarId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.catalog.similar_cars(id, q.limit) {
        Ok(cars) => (StatusCode::OK, Json(dto::items_json(&cars))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_car(
    _admin: AdminGuard,
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CarInput>, JsonRejection>,
) -> axum::response::Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    if let Err(e) = input.validate(current_year()) {
        return errors::service_error_to_response(e.into());
    }

    match services.catalog.create_car(input) {
        Ok(car) => (StatusCode::CREATED, Json(car)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_car(
    _admin: AdminGuard,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<CarPatch>, JsonRejection>,
) -> axum::response::Response {
    let id: CarId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(patch) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    if let Err(e) = patch.validate(current_year()) {
        return errors::service_error_to_response(e.into());
    }

    match services.catalog.update_car(id, patch) {
        Ok(car) => (StatusCode::OK, Json(car)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_car(
    _admin: AdminGuard,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CarId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.catalog.delete_car(id) {
        Ok(deleted) => (StatusCode::OK, Json(json!({ "deleted": deleted }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
