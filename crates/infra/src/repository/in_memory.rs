use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use carmarket_core::{DomainResult, Entity};

use crate::error::{ServiceError, ServiceResult};
use crate::repository::Repository;

/// In-memory store for tests/dev (and the default runtime backend).
///
/// Records live in an ordered map so iteration is ascending id.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    inner: RwLock<BTreeMap<E::Id, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> ServiceError {
    ServiceError::Unavailable("repository lock poisoned".to_string())
}

impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Clone + Send + Sync + 'static,
    E::Id: Send + Sync,
{
    fn get(&self, id: &E::Id) -> ServiceResult<Option<E>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.get(id).cloned())
    }

    fn insert(&self, entity: E) -> ServiceResult<()> {
        let mut map = self.inner.write().map_err(poisoned)?;
        map.insert(entity.id().clone(), entity);
        Ok(())
    }

    fn modify(
        &self,
        id: &E::Id,
        f: &mut dyn FnMut(&mut E) -> DomainResult<()>,
    ) -> ServiceResult<Option<E>> {
        let mut map = self.inner.write().map_err(poisoned)?;
        let Some(current) = map.get_mut(id) else {
            return Ok(None);
        };

        let mut next = current.clone();
        f(&mut next)?;
        *current = next.clone();
        Ok(Some(next))
    }

    fn remove(&self, id: &E::Id) -> ServiceResult<bool> {
        let mut map = self.inner.write().map_err(poisoned)?;
        Ok(map.remove(id).is_some())
    }

    fn list(&self) -> ServiceResult<Vec<E>> {
        let map = self.inner.read().map_err(poisoned)?;
        Ok(map.values().cloned().collect())
    }
}
