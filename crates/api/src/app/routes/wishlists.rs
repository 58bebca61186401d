//! Wishlist routes.
//!
//! Id-keyed routes are owner-scoped through the `x-user-id` header; a wishlist
//! owned by someone else (or by nobody) answers 404. The share id route is the
//! read-only capability for everyone else.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;

use carmarket_catalog::{NewWishlist, Wishlist};
use carmarket_core::{CarId, ShareId, WishlistId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::UserId;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_wishlists).post(create_wishlist))
        .route(
            "/:id",
            get(get_wishlist).patch(rename_wishlist).delete(delete_wishlist),
        )
        .route("/:id/cars", get(wishlist_cars).post(add_car))
        .route("/:id/cars/:car_id", delete(remove_car))
}

/// Parse the path id and load the wishlist if `user` owns it.
fn owned(
    services: &AppServices,
    raw_id: &str,
    user: &UserId,
) -> Result<Wishlist, axum::response::Response> {
    let id: WishlistId = errors::parse_id(raw_id)?;
    services
        .wishlists
        .get_owned(id, &user.0)
        .map_err(errors::service_error_to_response)
}

pub async fn create_wishlist(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<NewWishlist>, JsonRejection>,
) -> axum::response::Response {
    let Json(input) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.wishlists.create(input) {
        Ok(wishlist) => (StatusCode::CREATED, Json(wishlist)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `GET /api/wishlists?userId=...`
pub async fn list_wishlists(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::WishlistQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(q) = match query {
        Ok(q) => q,
        Err(e) => return errors::query_rejection(e),
    };
    let Some(user_id) = q.user_id.filter(|u| !u.trim().is_empty()) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "userId query parameter is required",
        );
    };

    match services.wishlists.list_for_user(&user_id) {
        Ok(lists) => (StatusCode::OK, Json(dto::items_json(&lists))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_wishlist(
    user: UserId,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match owned(&services, &id, &user) {
        Ok(wishlist) => (StatusCode::OK, Json(wishlist)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn rename_wishlist(
    user: UserId,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::RenameWishlistRequest>, JsonRejection>,
) -> axum::response::Response {
    let wishlist = match owned(&services, &id, &user) {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.wishlists.rename(wishlist.id, &body.name) {
        Ok(wishlist) => (StatusCode::OK, Json(wishlist)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_wishlist(
    user: UserId,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let wishlist = match owned(&services, &id, &user) {
        Ok(w) => w,
        Err(resp) => return resp,
    };

    match services.wishlists.delete(wishlist.id) {
        Ok(deleted) => (StatusCode::OK, Json(json!({ "deleted": deleted }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn wishlist_cars(
    user: UserId,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let wishlist = match owned(&services, &id, &user) {
        Ok(w) => w,
        Err(resp) => return resp,
    };

    match services.wishlists.cars(&wishlist) {
        Ok(cars) => (StatusCode::OK, Json(dto::items_json(&cars))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_car(
    user: UserId,
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::AddCarRequest>, JsonRejection>,
) -> axum::response::Response {
    let wishlist = match owned(&services, &id, &user) {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_rejection(e),
    };

    match services.wishlists.add_car(wishlist.id, body.car_id) {
        Ok(wishlist) => (StatusCode::OK, Json(wishlist)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn remove_car(
    user: UserId,
    Extension(services): Extension<Arc<AppServices>>,
    Path((id, car_id)): Path<(String, String)>,
) -> axum::response::Response {
    let wishlist = match owned(&services, &id, &user) {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    let car_id: CarId = match errors::parse_id(&car_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.wishlists.remove_car(wishlist.id, car_id) {
        Ok(wishlist) => (StatusCode::OK, Json(wishlist)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// `GET /api/shared/wishlists/:share_id`: read-only view with resolved cars.
pub async fn get_shared(
    Extension(services): Extension<Arc<AppServices>>,
    Path(share_id): Path<String>,
) -> axum::response::Response {
    let share_id: ShareId = match errors::parse_id(&share_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let shared = services.wishlists.get_by_share_id(&share_id).and_then(|w| {
        let cars = services.wishlists.cars(&w)?;
        Ok((w, cars))
    });

    match shared {
        Ok((wishlist, cars)) => (
            StatusCode::OK,
            Json(dto::shared_wishlist_to_json(&wishlist, &cars)),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
