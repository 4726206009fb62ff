//! Inventory catalog for move planning.
//!
//! Plain CRUD over catalog entries; inventory changes are routine data
//! entry and are not recorded in the activity log.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::InventoryItem;
use crate::store::{Collection, Store};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddItemRequest {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub item: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub volume: Decimal,
}

#[derive(Clone)]
pub struct InventoryService {
    store: Store,
}

impl InventoryService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, ServiceError> {
        Ok(self.store.list(Collection::Inventory).await?)
    }

    pub async fn get_item(&self, id: &str) -> Result<InventoryItem, ServiceError> {
        self.store
            .find(Collection::Inventory, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inventory item {} not found", id)))
    }

    #[instrument(skip(self, request), fields(item = %request.item))]
    pub async fn add_item(&self, request: AddItemRequest) -> Result<InventoryItem, ServiceError> {
        request.validate()?;
        if request.volume.is_sign_negative() {
            return Err(ServiceError::ValidationError(
                "volume must not be negative".into(),
            ));
        }

        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            item: request.item,
            category: request.category,
            volume: request.volume,
        };
        self.store.insert(Collection::Inventory, &item).await?;
        Ok(item)
    }

    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn delete_item(&self, id: &str) -> Result<(), ServiceError> {
        let removed = self.store.remove(Collection::Inventory, id).await?;
        if !removed {
            return Err(ServiceError::NotFound(format!(
                "Inventory item {} not found",
                id
            )));
        }
        Ok(())
    }
}
