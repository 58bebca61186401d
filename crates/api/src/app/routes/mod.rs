use axum::{routing::get, Router};

pub mod cars;
pub mod contact;
pub mod system;
pub mod wishlists;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/cars", cars::router())
        .route("/contact-messages", get(contact::list_messages))
        .nest("/wishlists", wishlists::router())
        .route("/shared/wishlists/:share_id", get(wishlists::get_shared))
}
