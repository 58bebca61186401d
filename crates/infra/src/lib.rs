//! Infrastructure layer: storage, services and configuration.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod repository;
pub mod wishlists;

pub use catalog::{CarCatalog, ListingDefaults};
pub use contact::ContactInbox;
pub use error::{ServiceError, ServiceResult};
pub use repository::{InMemoryRepository, Repository};
pub use wishlists::WishlistService;
