use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carmarket_core::{CarId, DomainError, DomainResult, Entity, MessageId};

/// An inquiry sent to the seller of a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: MessageId,
    pub car_id: CarId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Entity for ContactMessage {
    type Id = MessageId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

impl NewContactMessage {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email must be a valid address"));
        }
        if self.message.trim().is_empty() {
            return Err(DomainError::validation("message cannot be empty"));
        }
        Ok(())
    }

    pub fn into_message(self, id: MessageId, car_id: CarId, created_at: DateTime<Utc>) -> ContactMessage {
        ContactMessage {
            id,
            car_id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            message: self.message,
            created_at,
        }
    }
}
