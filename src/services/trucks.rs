//! Fleet management.
//!
//! Trucks are plain records keyed by an internal id, carrying a
//! human-facing fleet label (`truckId`). Quotes reference trucks by label
//! only; deleting a truck never touches the quotes that point at it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::Truck;
use crate::services::activity::ActivityLogger;
use crate::store::{Collection, Store};

pub const DEFAULT_TRUCK_STATUS: &str = "Available";

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct AddTruckRequest {
    #[serde(rename = "truckId")]
    #[validate(length(min = 1, message = "Fleet label is required"))]
    pub truck_id: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Truck type is required"))]
    pub truck_type: String,
    pub capacity: Decimal,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateTruckRequest {
    #[serde(default, rename = "truckId")]
    pub truck_id: Option<String>,
    #[serde(default, rename = "type")]
    pub truck_type: Option<String>,
    #[serde(default)]
    pub capacity: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct FleetService {
    store: Store,
    activity: ActivityLogger,
}

impl FleetService {
    pub fn new(store: Store, activity: ActivityLogger) -> Self {
        Self { store, activity }
    }

    pub async fn list_trucks(&self) -> Result<Vec<Truck>, ServiceError> {
        Ok(self.store.list(Collection::Trucks).await?)
    }

    pub async fn get_truck(&self, id: &str) -> Result<Truck, ServiceError> {
        self.store
            .find(Collection::Trucks, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Truck {} not found", id)))
    }

    #[instrument(skip(self, request), fields(label = %request.truck_id))]
    pub async fn add_truck(
        &self,
        request: AddTruckRequest,
        actor: &str,
    ) -> Result<Truck, ServiceError> {
        request.validate()?;
        if request.capacity.is_sign_negative() {
            return Err(ServiceError::ValidationError(
                "capacity must not be negative".into(),
            ));
        }

        let truck = Truck {
            id: Uuid::new_v4().to_string(),
            truck_id: request.truck_id,
            truck_type: request.truck_type,
            capacity: request.capacity,
            status: request
                .status
                .unwrap_or_else(|| DEFAULT_TRUCK_STATUS.to_string()),
        };
        self.store.insert(Collection::Trucks, &truck).await?;

        info!(truck_id = %truck.id, "truck added");
        self.activity
            .log(
                "Truck Added",
                format!("Truck {} added to fleet", truck.truck_id),
                actor,
            )
            .await?;

        Ok(truck)
    }

    #[instrument(skip(self, request), fields(truck_id = %id))]
    pub async fn update_truck(
        &self,
        id: &str,
        request: UpdateTruckRequest,
        actor: &str,
    ) -> Result<Truck, ServiceError> {
        if let Some(capacity) = request.capacity {
            if capacity.is_sign_negative() {
                return Err(ServiceError::ValidationError(
                    "capacity must not be negative".into(),
                ));
            }
        }

        let mut patch = Map::new();
        if let Some(label) = request.truck_id {
            patch.insert("truckId".into(), json!(label));
        }
        if let Some(truck_type) = request.truck_type {
            patch.insert("type".into(), json!(truck_type));
        }
        if let Some(capacity) = request.capacity {
            patch.insert("capacity".into(), json!(capacity));
        }
        if let Some(status) = request.status {
            patch.insert("status".into(), json!(status));
        }

        let updated: Truck = self
            .store
            .patch(Collection::Trucks, id, Value::Object(patch))
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Truck {} not found", id)))?;

        self.activity
            .log(
                "Truck Updated",
                format!("Truck {} updated", updated.truck_id),
                actor,
            )
            .await?;

        Ok(updated)
    }

    #[instrument(skip(self), fields(truck_id = %id))]
    pub async fn delete_truck(&self, id: &str, actor: &str) -> Result<(), ServiceError> {
        let truck = self.get_truck(id).await?;
        self.store.remove(Collection::Trucks, id).await?;

        self.activity
            .log(
                "Truck Removed",
                format!("Truck {} removed from fleet", truck.truck_id),
                actor,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service() -> FleetService {
        let store = Store::new(Arc::new(MemoryStore::new()));
        FleetService::new(store.clone(), ActivityLogger::new(store))
    }

    fn box_truck() -> AddTruckRequest {
        AddTruckRequest {
            truck_id: "T-1".into(),
            truck_type: "26ft Box Truck".into(),
            capacity: dec!(1700),
            status: None,
        }
    }

    #[tokio::test]
    async fn added_trucks_default_to_available() {
        let svc = service();
        let truck = svc.add_truck(box_truck(), "admin").await.unwrap();
        assert_eq!(truck.status, DEFAULT_TRUCK_STATUS);

        let mut in_service = box_truck();
        in_service.truck_id = "T-2".into();
        in_service.status = Some("In Maintenance".into());
        let truck = svc.add_truck(in_service, "admin").await.unwrap();
        assert_eq!(truck.status, "In Maintenance");
    }

    #[tokio::test]
    async fn partial_update_leaves_other_fields_alone() {
        let svc = service();
        let truck = svc.add_truck(box_truck(), "admin").await.unwrap();

        let updated = svc
            .update_truck(
                &truck.id,
                UpdateTruckRequest {
                    status: Some("On Job".into()),
                    ..Default::default()
                },
                "admin",
            )
            .await
            .unwrap();

        assert_eq!(updated.status, "On Job");
        assert_eq!(updated.truck_id, "T-1");
        assert_eq!(updated.capacity, dec!(1700));
    }

    #[tokio::test]
    async fn delete_is_reported_for_unknown_trucks() {
        let svc = service();
        let truck = svc.add_truck(box_truck(), "admin").await.unwrap();

        svc.delete_truck(&truck.id, "admin").await.unwrap();
        assert!(svc.list_trucks().await.unwrap().is_empty());

        let err = svc.delete_truck(&truck.id, "admin").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
