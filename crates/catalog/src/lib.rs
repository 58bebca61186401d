//! Car catalog domain module.
//!
//! This crate contains the business rules for car listings, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage): the car record
//! and its validated inputs, the canonical listing order, the filter pipeline
//! and the similarity ranker. Wishlists and contact messages live here too
//! since they reference cars by id.

pub mod car;
pub mod contact;
pub mod filter;
pub mod listing;
pub mod similarity;
pub mod wishlist;

#[cfg(test)]
pub(crate) mod fixtures;

pub use car::{Car, CarInput, CarPatch};
pub use contact::{ContactMessage, NewContactMessage};
pub use filter::CarFilter;
pub use listing::{DEFAULT_FEATURED_LIMIT, DEFAULT_RECENT_LIMIT, DEFAULT_SIMILAR_LIMIT};
pub use similarity::ScoredCar;
pub use wishlist::{NewWishlist, Wishlist};
