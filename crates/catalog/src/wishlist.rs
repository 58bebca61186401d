use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carmarket_core::{CarId, DomainError, DomainResult, Entity, ShareId, WishlistId};

/// A named, shareable collection of car ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wishlist {
    pub id: WishlistId,
    pub user_id: Option<String>,
    pub share_id: ShareId,
    pub name: String,
    pub car_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Entity for Wishlist {
    type Id = WishlistId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Wishlist {
    pub fn contains(&self, car_id: CarId) -> bool {
        let key = car_id.to_string();
        self.car_ids.iter().any(|c| *c == key)
    }

    /// Returns `false` when the car was already present.
    pub fn add_car(&mut self, car_id: CarId) -> bool {
        if self.contains(car_id) {
            return false;
        }
        self.car_ids.push(car_id.to_string());
        true
    }

    /// Returns `false` when the car was not present.
    pub fn remove_car(&mut self, car_id: CarId) -> bool {
        let key = car_id.to_string();
        let before = self.car_ids.len();
        self.car_ids.retain(|c| *c != key);
        self.car_ids.len() != before
    }

    /// Car ids that parse; stale or foreign strings are skipped.
    pub fn parsed_car_ids(&self) -> Vec<CarId> {
        self.car_ids.iter().filter_map(|c| c.parse().ok()).collect()
    }

    pub fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = validate_name(name)?;
        Ok(())
    }

    /// Id-keyed access is for the owner only. Another user, or any caller for
    /// an ownerless wishlist, sees `NotFound`; the share id is the only way in.
    pub fn ensure_owner(&self, user_id: &str) -> DomainResult<()> {
        match self.user_id.as_deref() {
            Some(owner) if owner == user_id => Ok(()),
            _ => Err(DomainError::not_found()),
        }
    }
}

/// Payload for creating a wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWishlist {
    pub name: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub car_ids: Vec<CarId>,
}

impl NewWishlist {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name).map(|_| ())
    }

    pub fn into_wishlist(
        self,
        id: WishlistId,
        share_id: ShareId,
        created_at: DateTime<Utc>,
    ) -> Wishlist {
        let mut wishlist = Wishlist {
            id,
            user_id: self.user_id.filter(|u| !u.trim().is_empty()),
            share_id,
            name: self.name.trim().to_string(),
            car_ids: Vec::with_capacity(self.car_ids.len()),
            created_at,
        };
        for car_id in self.car_ids {
            wishlist.add_car(car_id);
        }
        wishlist
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("wishlist name cannot be empty"));
    }
    Ok(name.to_string())
}
