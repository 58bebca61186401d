use serde::Deserialize;
use serde::Serialize;
use serde_json::json;

use carmarket_catalog::{Car, Wishlist};
use carmarket_core::CarId;

#[derive(Debug, Default, Deserialize)]
pub struct LimitQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCarRequest {
    pub car_id: CarId,
}

#[derive(Debug, Deserialize)]
pub struct RenameWishlistRequest {
    pub name: String,
}

pub fn items_json<T: Serialize>(items: &[T]) -> serde_json::Value {
    json!({ "items": items })
}

pub fn shared_wishlist_to_json(wishlist: &Wishlist, cars: &[Car]) -> serde_json::Value {
    json!({
        "wishlist": wishlist,
        "cars": cars,
    })
}
