//! Car catalog service: repository + filter pipeline + similarity ranker.
//!
//! Ids are assigned from a monotonic sequence and `created_at` is stamped here;
//! inputs are expected to be validated by the caller.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use carmarket_catalog::{
    listing, similarity, Car, CarFilter, CarInput, CarPatch, DEFAULT_FEATURED_LIMIT,
    DEFAULT_RECENT_LIMIT, DEFAULT_SIMILAR_LIMIT,
};
use carmarket_core::CarId;

use crate::error::{ServiceError, ServiceResult};
use crate::repository::{IdSequence, InMemoryRepository, Repository};

/// Limits used when a caller does not pass one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingDefaults {
    pub featured: usize,
    pub recent: usize,
    pub similar: usize,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            featured: DEFAULT_FEATURED_LIMIT,
            recent: DEFAULT_RECENT_LIMIT,
            similar: DEFAULT_SIMILAR_LIMIT,
        }
    }
}

#[derive(Debug)]
pub struct CarCatalog<R = InMemoryRepository<Car>>
where
    R: Repository<Car>,
{
    cars: R,
    ids: IdSequence,
    defaults: ListingDefaults,
}

impl CarCatalog {
    /// Empty in-memory catalog.
    pub fn in_memory() -> Self {
        Self::new(InMemoryRepository::new())
    }
}

impl<R> CarCatalog<R>
where
    R: Repository<Car>,
{
    pub fn new(cars: R) -> Self {
        Self {
            cars,
            ids: IdSequence::new(),
            defaults: ListingDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: ListingDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn create_car(&self, input: CarInput) -> ServiceResult<Car> {
        self.create_car_at(input, Utc::now())
    }

    /// Create with an explicit creation time (imports, tests).
    pub fn create_car_at(&self, input: CarInput, created_at: DateTime<Utc>) -> ServiceResult<Car> {
        let id = CarId::new(self.ids.next_id());
        let car = input.into_car(id, created_at);
        self.cars.insert(car.clone())?;
        tracing::info!(car_id = %id, make = %car.make, model = %car.model, "car created");
        Ok(car)
    }

    pub fn find_car(&self, id: CarId) -> ServiceResult<Option<Car>> {
        self.cars.get(&id)
    }

    pub fn get_car(&self, id: CarId) -> ServiceResult<Car> {
        self.find_car(id)?.ok_or(ServiceError::NotFound)
    }

    pub fn exists(&self, id: CarId) -> ServiceResult<bool> {
        Ok(self.find_car(id)?.is_some())
    }

    /// Shallow-merge `patch` over the stored record; id and `created_at` are kept.
    pub fn update_car(&self, id: CarId, patch: CarPatch) -> ServiceResult<Car> {
        let mut patch = Some(patch);
        let updated = self.cars.modify(&id, &mut |car: &mut Car| {
            if let Some(p) = patch.take() {
                car.apply_patch(p);
            }
            Ok(())
        })?;

        match updated {
            Some(car) => {
                tracing::info!(car_id = %id, "car updated");
                Ok(car)
            }
            None => Err(ServiceError::NotFound),
        }
    }

    /// Permanently remove a car. Deleting a missing id is not an error.
    pub fn delete_car(&self, id: CarId) -> ServiceResult<bool> {
        let removed = self.cars.remove(&id)?;
        if removed {
            tracing::info!(car_id = %id, "car deleted");
        }
        Ok(removed)
    }

    /// Every car, newest first.
    pub fn list_cars(&self) -> ServiceResult<Vec<Car>> {
        let mut cars = self.cars.list()?;
        listing::sort_newest_first(&mut cars);
        Ok(cars)
    }

    pub fn list_featured(&self, limit: Option<usize>) -> ServiceResult<Vec<Car>> {
        let limit = limit.unwrap_or(self.defaults.featured);
        Ok(listing::featured(self.cars.list()?, limit))
    }

    pub fn list_recent(&self, limit: Option<usize>) -> ServiceResult<Vec<Car>> {
        let limit = limit.unwrap_or(self.defaults.recent);
        Ok(listing::recent(self.cars.list()?, limit))
    }

    /// Run the filter pipeline over the whole catalog.
    pub fn filter_cars(&self, filter: &CarFilter) -> ServiceResult<Vec<Car>> {
        let all = self.cars.list()?;
        let total = all.len();

        let cars = filter.apply_with(all, |field, remaining| {
            tracing::trace!(field, remaining, "filter predicate applied");
        });

        tracing::debug!(total, matched = cars.len(), "cars filtered");
        Ok(cars)
    }

    /// Up to `limit` cars most similar to `id`. An unknown reference yields `[]`.
    pub fn similar_cars(&self, id: CarId, limit: Option<usize>) -> ServiceResult<Vec<Car>> {
        let limit = limit.unwrap_or(self.defaults.similar);
        let all = self.cars.list()?;

        let Some(reference) = all.iter().find(|c| c.id == id).cloned() else {
            tracing::debug!(car_id = %id, "similar cars requested for unknown reference");
            return Ok(Vec::new());
        };

        let similar = similarity::most_similar(&reference, &all, limit);
        tracing::debug!(car_id = %id, returned = similar.len(), "similar cars ranked");
        Ok(similar)
    }

    /// Resolve ids to cars (newest first), skipping ids that no longer exist.
    pub fn cars_by_ids(&self, ids: &[CarId]) -> ServiceResult<Vec<Car>> {
        let wanted: BTreeSet<CarId> = ids.iter().copied().collect();
        let mut cars: Vec<Car> = self
            .cars
            .list()?
            .into_iter()
            .filter(|c| wanted.contains(&c.id))
            .collect();
        listing::sort_newest_first(&mut cars);
        Ok(cars)
    }
}
