pub mod activity;
pub mod claims;
pub mod estimator;
pub mod inventory;
pub mod quotes;
pub mod stats;
pub mod trucks;

use crate::store::Store;

/// Aggregates the per-entity services consumed by the HTTP handlers.
#[derive(Clone)]
pub struct AppServices {
    pub quotes: quotes::QuoteService,
    pub claims: claims::ClaimService,
    pub trucks: trucks::FleetService,
    pub inventory: inventory::InventoryService,
    pub activity: activity::ActivityLogger,
}

impl AppServices {
    pub fn new(store: Store) -> Self {
        let activity = activity::ActivityLogger::new(store.clone());
        Self {
            quotes: quotes::QuoteService::new(store.clone(), activity.clone()),
            claims: claims::ClaimService::new(store.clone(), activity.clone()),
            trucks: trucks::FleetService::new(store.clone(), activity.clone()),
            inventory: inventory::InventoryService::new(store),
            activity,
        }
    }
}
