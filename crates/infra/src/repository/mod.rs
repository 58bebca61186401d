//! Keyed entity storage abstractions.
//!
//! Services talk to a [`Repository`]; the in-memory implementation is the only
//! backend today, a persistent one can slot in behind the same trait.

pub mod in_memory;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use carmarket_core::{DomainResult, Entity};

use crate::error::ServiceResult;

pub use in_memory::InMemoryRepository;

/// Keyed store for one entity type.
///
/// `list` returns records in ascending id order. `modify` runs the closure on a
/// copy under the store's write lock and only stores the result if the closure
/// succeeds, so a failed update leaves the record untouched.
pub trait Repository<E: Entity>: Send + Sync {
    fn get(&self, id: &E::Id) -> ServiceResult<Option<E>>;
    fn insert(&self, entity: E) -> ServiceResult<()>;
    fn modify(
        &self,
        id: &E::Id,
        f: &mut dyn FnMut(&mut E) -> DomainResult<()>,
    ) -> ServiceResult<Option<E>>;
    fn remove(&self, id: &E::Id) -> ServiceResult<bool>;
    fn list(&self) -> ServiceResult<Vec<E>>;
}

impl<E, S> Repository<E> for Arc<S>
where
    E: Entity,
    S: Repository<E> + ?Sized,
{
    fn get(&self, id: &E::Id) -> ServiceResult<Option<E>> {
        (**self).get(id)
    }

    fn insert(&self, entity: E) -> ServiceResult<()> {
        (**self).insert(entity)
    }

    fn modify(
        &self,
        id: &E::Id,
        f: &mut dyn FnMut(&mut E) -> DomainResult<()>,
    ) -> ServiceResult<Option<E>> {
        (**self).modify(id, f)
    }

    fn remove(&self, id: &E::Id) -> ServiceResult<bool> {
        (**self).remove(id)
    }

    fn list(&self) -> ServiceResult<Vec<E>> {
        (**self).list()
    }
}

/// Monotonic id source (first value is 1).
#[derive(Debug)]
pub struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
