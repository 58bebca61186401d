//! Contact inbox: inquiries sent about a listing.

use std::sync::Arc;

use chrono::Utc;

use carmarket_catalog::{Car, ContactMessage, NewContactMessage};
use carmarket_core::{CarId, MessageId};

use crate::catalog::CarCatalog;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{IdSequence, InMemoryRepository, Repository};

pub struct ContactInbox<M = InMemoryRepository<ContactMessage>, R = InMemoryRepository<Car>>
where
    M: Repository<ContactMessage>,
    R: Repository<Car>,
{
    messages: M,
    ids: IdSequence,
    catalog: Arc<CarCatalog<R>>,
}

impl<R> ContactInbox<InMemoryRepository<ContactMessage>, R>
where
    R: Repository<Car>,
{
    pub fn in_memory(catalog: Arc<CarCatalog<R>>) -> Self {
        Self::new(InMemoryRepository::new(), catalog)
    }
}

impl<M, R> ContactInbox<M, R>
where
    M: Repository<ContactMessage>,
    R: Repository<Car>,
{
    pub fn new(messages: M, catalog: Arc<CarCatalog<R>>) -> Self {
        Self {
            messages,
            ids: IdSequence::new(),
            catalog,
        }
    }

    pub fn submit(&self, car_id: CarId, input: NewContactMessage) -> ServiceResult<ContactMessage> {
        if !self.catalog.exists(car_id)? {
            return Err(ServiceError::NotFound);
        }
        input.validate()?;

        let id = MessageId::new(self.ids.next_id());
        let message = input.into_message(id, car_id, Utc::now());
        self.messages.insert(message.clone())?;
        tracing::info!(message_id = %id, car_id = %car_id, "contact message received");
        Ok(message)
    }

    /// Every message, newest first.
    pub fn list_all(&self) -> ServiceResult<Vec<ContactMessage>> {
        let mut out = self.messages.list()?;
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(out)
    }

    pub fn list_for_car(&self, car_id: CarId) -> ServiceResult<Vec<ContactMessage>> {
        let mut out = self.list_all()?;
        out.retain(|m| m.car_id == car_id);
        Ok(out)
    }
}
