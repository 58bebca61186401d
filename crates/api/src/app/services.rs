use std::sync::Arc;

use carmarket_infra::config::AppConfig;
use carmarket_infra::{CarCatalog, ContactInbox, WishlistService};

/// Services shared by every handler.
pub struct AppServices {
    pub catalog: Arc<CarCatalog>,
    pub wishlists: WishlistService,
    pub contact: ContactInbox,
}

impl AppServices {
    pub fn new(catalog: Arc<CarCatalog>) -> Self {
        Self {
            wishlists: WishlistService::in_memory(catalog.clone()),
            contact: ContactInbox::in_memory(catalog.clone()),
            catalog,
        }
    }
}

pub fn build_services(config: &AppConfig) -> AppServices {
    let catalog = Arc::new(CarCatalog::in_memory().with_defaults(config.listing));
    tracing::info!(
        featured = config.listing.featured,
        recent = config.listing.recent,
        similar = config.listing.similar,
        "in-memory catalog ready"
    );
    AppServices::new(catalog)
}
