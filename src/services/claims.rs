//! Claims workflow.
//!
//! Claims nominally move Pending → Under Review → Approved/Denied → Settled,
//! but processing is deliberately permissive: back-office staff may set any
//! status at any time, including re-opening a Settled claim. `updatedAt` is
//! refreshed on every processing call whether or not any field changed.

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{Claim, ClaimStatus};
use crate::services::activity::ActivityLogger;
use crate::store::{Collection, Store};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct FileClaimRequest {
    #[validate(length(min = 1, message = "Claimant name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Claim type is required"))]
    pub claim_type: String,
    pub amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProcessClaimRequest {
    #[serde(default)]
    pub status: Option<ClaimStatus>,
    #[serde(default, rename = "settledAmount")]
    pub settled_amount: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct ClaimService {
    store: Store,
    activity: ActivityLogger,
}

impl ClaimService {
    pub fn new(store: Store, activity: ActivityLogger) -> Self {
        Self { store, activity }
    }

    pub async fn list_claims(&self) -> Result<Vec<Claim>, ServiceError> {
        Ok(self.store.list(Collection::Claims).await?)
    }

    pub async fn get_claim(&self, id: &str) -> Result<Claim, ServiceError> {
        self.store
            .find(Collection::Claims, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Claim {} not found", id)))
    }

    #[instrument(skip(self, request), fields(claimant = %request.name))]
    pub async fn file_claim(
        &self,
        request: FileClaimRequest,
        actor: &str,
    ) -> Result<Claim, ServiceError> {
        request.validate()?;
        if request.amount.is_sign_negative() {
            return Err(ServiceError::ValidationError(
                "claim amount must not be negative".into(),
            ));
        }

        let claim = Claim {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            claim_type: request.claim_type,
            amount: request.amount,
            status: ClaimStatus::Pending,
            settled_amount: Decimal::ZERO,
            notes: request.notes,
            updated_at: Utc::now(),
        };
        self.store.insert(Collection::Claims, &claim).await?;

        info!(claim_id = %claim.id, "claim filed");
        self.activity
            .log(
                "Claim Filed",
                format!("New claim filed: {} (${})", claim.claim_type, claim.amount),
                actor,
            )
            .await?;

        Ok(claim)
    }

    /// Applies whatever status, settlement amount and notes the caller
    /// supplies. Any status transition is accepted.
    #[instrument(skip(self, request), fields(claim_id = %id))]
    pub async fn process_claim(
        &self,
        id: &str,
        request: ProcessClaimRequest,
        actor: &str,
    ) -> Result<Claim, ServiceError> {
        if let Some(amount) = request.settled_amount {
            if amount.is_sign_negative() {
                return Err(ServiceError::ValidationError(
                    "settled amount must not be negative".into(),
                ));
            }
        }

        let mut patch = Map::new();
        if let Some(status) = request.status {
            patch.insert("status".into(), json!(status));
        }
        if let Some(amount) = request.settled_amount {
            patch.insert("settledAmount".into(), json!(amount));
        }
        if let Some(notes) = request.notes {
            patch.insert("notes".into(), json!(notes));
        }
        // Touched even on an empty update
        patch.insert("updatedAt".into(), json!(Utc::now()));

        let updated: Claim = self
            .store
            .patch(Collection::Claims, id, Value::Object(patch))
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Claim {} not found", id)))?;

        info!(claim_id = %id, status = %updated.status, "claim processed");
        self.activity
            .log(
                "Claim Processed",
                format!("Claim for {} marked {}", updated.name, updated.status),
                actor,
            )
            .await?;

        Ok(updated)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    pub async fn delete_claim(&self, id: &str, actor: &str) -> Result<(), ServiceError> {
        let claim = self.get_claim(id).await?;
        self.store.remove(Collection::Claims, id).await?;

        self.activity
            .log(
                "Claim Deleted",
                format!("Claim for {} deleted", claim.name),
                actor,
            )
            .await?;
        Ok(())
    }
}
