//! Wishlist service: repository-backed wishlists with share-token access.

use std::sync::Arc;

use chrono::Utc;

use carmarket_catalog::{Car, NewWishlist, Wishlist};
use carmarket_core::{CarId, ShareId, WishlistId};

use crate::catalog::CarCatalog;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{IdSequence, InMemoryRepository, Repository};

pub struct WishlistService<W = InMemoryRepository<Wishlist>, R = InMemoryRepository<Car>>
where
    W: Repository<Wishlist>,
    R: Repository<Car>,
{
    wishlists: W,
    ids: IdSequence,
    catalog: Arc<CarCatalog<R>>,
}

impl<R> WishlistService<InMemoryRepository<Wishlist>, R>
where
    R: Repository<Car>,
{
    pub fn in_memory(catalog: Arc<CarCatalog<R>>) -> Self {
        Self::new(InMemoryRepository::new(), catalog)
    }
}

impl<W, R> WishlistService<W, R>
where
    W: Repository<Wishlist>,
    R: Repository<Car>,
{
    pub fn new(wishlists: W, catalog: Arc<CarCatalog<R>>) -> Self {
        Self {
            wishlists,
            ids: IdSequence::new(),
            catalog,
        }
    }

    /// Create a wishlist; every initial car id must exist.
    pub fn create(&self, input: NewWishlist) -> ServiceResult<Wishlist> {
        input.validate()?;
        for car_id in &input.car_ids {
            self.ensure_car(*car_id)?;
        }

        let id = WishlistId::new(self.ids.next_id());
        let wishlist = input.into_wishlist(id, ShareId::generate(), Utc::now());
        self.wishlists.insert(wishlist.clone())?;
        tracing::info!(wishlist_id = %id, cars = wishlist.car_ids.len(), "wishlist created");
        Ok(wishlist)
    }

    pub fn get(&self, id: WishlistId) -> ServiceResult<Wishlist> {
        self.wishlists.get(&id)?.ok_or(ServiceError::NotFound)
    }

    /// [`get`](Self::get), restricted to the wishlist's owner.
    pub fn get_owned(&self, id: WishlistId, user_id: &str) -> ServiceResult<Wishlist> {
        let wishlist = self.get(id)?;
        wishlist.ensure_owner(user_id)?;
        Ok(wishlist)
    }

    pub fn get_by_share_id(&self, share_id: &ShareId) -> ServiceResult<Wishlist> {
        self.wishlists
            .list()?
            .into_iter()
            .find(|w| &w.share_id == share_id)
            .ok_or(ServiceError::NotFound)
    }

    /// Wishlists owned by `user_id`, newest first.
    pub fn list_for_user(&self, user_id: &str) -> ServiceResult<Vec<Wishlist>> {
        let mut out: Vec<Wishlist> = self
            .wishlists
            .list()?
            .into_iter()
            .filter(|w| w.user_id.as_deref() == Some(user_id))
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(out)
    }

    pub fn rename(&self, id: WishlistId, name: &str) -> ServiceResult<Wishlist> {
        self.wishlists
            .modify(&id, &mut |w: &mut Wishlist| w.rename(name))?
            .ok_or(ServiceError::NotFound)
    }

    /// Add a car; adding one that is already present is a no-op.
    pub fn add_car(&self, id: WishlistId, car_id: CarId) -> ServiceResult<Wishlist> {
        self.ensure_car(car_id)?;
        let wishlist = self
            .wishlists
            .modify(&id, &mut |w: &mut Wishlist| {
                w.add_car(car_id);
                Ok(())
            })?
            .ok_or(ServiceError::NotFound)?;
        tracing::debug!(wishlist_id = %id, car_id = %car_id, "car added to wishlist");
        Ok(wishlist)
    }

    /// Remove a car; removing one that is absent is a no-op.
    pub fn remove_car(&self, id: WishlistId, car_id: CarId) -> ServiceResult<Wishlist> {
        self.wishlists
            .modify(&id, &mut |w: &mut Wishlist| {
                w.remove_car(car_id);
                Ok(())
            })?
            .ok_or(ServiceError::NotFound)
    }

    pub fn delete(&self, id: WishlistId) -> ServiceResult<bool> {
        let removed = self.wishlists.remove(&id)?;
        if removed {
            tracing::info!(wishlist_id = %id, "wishlist deleted");
        }
        Ok(removed)
    }

    /// Cars referenced by the wishlist, newest first; deleted cars are skipped.
    pub fn cars(&self, wishlist: &Wishlist) -> ServiceResult<Vec<Car>> {
        self.catalog.cars_by_ids(&wishlist.parsed_car_ids())
    }

    fn ensure_car(&self, car_id: CarId) -> ServiceResult<()> {
        if self.catalog.exists(car_id)? {
            Ok(())
        } else {
            Err(ServiceError::NotFound)
        }
    }
}
