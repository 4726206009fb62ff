//! Quote lifecycle engine.
//!
//! Quotes move Pending → Approved through [`QuoteService::approve_quote`];
//! truck assignment is orthogonal to the state machine and only allowed on
//! Approved quotes. Rescheduling deliberately bypasses the approval gate so
//! staff can adjust date, time and price after the fact. The transition
//! rules are enforced here, centrally, rather than by field overwrites.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::errors::ServiceError;
use crate::models::{Quote, QuoteStatus, Truck};
use crate::services::activity::ActivityLogger;
use crate::store::{Collection, Store};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateQuoteRequest {
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Origin is required"))]
    pub origin: String,
    #[validate(length(min = 1, message = "Destination is required"))]
    pub dest: String,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[serde(default)]
    pub time: Option<String>,
    /// Provisional estimate; omitted when the quote is created ahead of
    /// pricing (defaults to 0).
    #[serde(default)]
    pub amount: Option<Decimal>,
}

/// Generic partial update covering the non-lifecycle fields. Status and
/// truck reference have dedicated operations.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateQuoteRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub dest: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
}

#[derive(Clone)]
pub struct QuoteService {
    store: Store,
    activity: ActivityLogger,
}

impl QuoteService {
    pub fn new(store: Store, activity: ActivityLogger) -> Self {
        Self { store, activity }
    }

    /// Quotes newest-first, the order the dashboard lists them in.
    pub async fn list_quotes(&self) -> Result<Vec<Quote>, ServiceError> {
        let mut quotes: Vec<Quote> = self.store.list(Collection::Quotes).await?;
        quotes.reverse();
        Ok(quotes)
    }

    pub async fn get_quote(&self, id: &str) -> Result<Quote, ServiceError> {
        self.store
            .find(Collection::Quotes, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Quote {} not found", id)))
    }

    #[instrument(skip(self, request), fields(customer = %request.name))]
    pub async fn create_quote(
        &self,
        request: CreateQuoteRequest,
        actor: &str,
    ) -> Result<Quote, ServiceError> {
        request.validate()?;
        let amount = request.amount.unwrap_or_default();
        require_non_negative(amount, "amount")?;

        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            origin: request.origin,
            dest: request.dest,
            date: request.date,
            time: request.time,
            amount,
            status: QuoteStatus::Pending,
            truck_id: None,
        };
        self.store.insert(Collection::Quotes, &quote).await?;

        info!(quote_id = %quote.id, "quote created");
        self.activity
            .log(
                "Quote Created",
                format!(
                    "New quote for {} from {} to {}",
                    quote.name, quote.origin, quote.dest
                ),
                actor,
            )
            .await?;

        Ok(quote)
    }

    /// Pending → Approved, fixing the final price. Approving a quote in any
    /// other state is rejected; re-approval is not idempotent by design.
    #[instrument(skip(self), fields(quote_id = %id))]
    pub async fn approve_quote(
        &self,
        id: &str,
        final_price: Decimal,
        actor: &str,
    ) -> Result<Quote, ServiceError> {
        require_non_negative(final_price, "final price")?;

        let quote = self.get_quote(id).await?;
        if quote.status != QuoteStatus::Pending {
            return Err(ServiceError::InvalidTransition(format!(
                "quote is {}, only Pending quotes can be approved",
                quote.status
            )));
        }

        let updated = self
            .patch_quote(id, json!({ "status": QuoteStatus::Approved, "amount": final_price }))
            .await?;

        info!(quote_id = %id, "quote approved");
        self.activity
            .log(
                "Quote Approved",
                format!("Quote for {} approved at ${}", updated.name, final_price),
                actor,
            )
            .await?;

        Ok(updated)
    }

    /// Sets or clears the truck reference on an Approved quote. When a
    /// label is supplied it must exist in the fleet; availability is not
    /// checked.
    #[instrument(skip(self), fields(quote_id = %id))]
    pub async fn assign_truck(
        &self,
        id: &str,
        truck_id: Option<String>,
        actor: &str,
    ) -> Result<Quote, ServiceError> {
        let quote = self.get_quote(id).await?;
        if quote.status != QuoteStatus::Approved {
            return Err(ServiceError::InvalidTransition(
                "truck assignment requires an Approved quote".into(),
            ));
        }

        if let Some(label) = &truck_id {
            let trucks: Vec<Truck> = self.store.list(Collection::Trucks).await?;
            if !trucks.iter().any(|t| &t.truck_id == label) {
                return Err(ServiceError::NotFound(format!(
                    "Truck {} is not in the fleet",
                    label
                )));
            }
        }

        let updated = self.patch_quote(id, json!({ "truckId": truck_id })).await?;

        let details = match &updated.truck_id {
            Some(label) => format!("Truck {} assigned to {}", label, updated.name),
            None => format!("Truck unassigned from {}", updated.name),
        };
        self.activity.log("Truck Assigned", details, actor).await?;

        Ok(updated)
    }

    /// Field update on any quote regardless of status. This intentionally
    /// bypasses the approval gate: an Approved move can be re-dated and
    /// re-priced without going back through Pending.
    #[instrument(skip(self, request), fields(quote_id = %id))]
    pub async fn reschedule(
        &self,
        id: &str,
        request: UpdateQuoteRequest,
        actor: &str,
    ) -> Result<Quote, ServiceError> {
        // Existence check up front so an empty patch still 404s correctly
        let quote = self.get_quote(id).await?;

        if let Some(amount) = request.amount {
            require_non_negative(amount, "amount")?;
        }

        let mut patch = Map::new();
        if let Some(date) = request.date {
            patch.insert("date".into(), json!(date));
        }
        if let Some(time) = request.time {
            patch.insert("time".into(), json!(time));
        }
        if let Some(amount) = request.amount {
            patch.insert("amount".into(), json!(amount));
        }

        let updated = self.patch_quote(id, Value::Object(patch)).await?;

        self.activity
            .log(
                "Move Rescheduled",
                format!("Move for {} rescheduled to {}", quote.name, updated.date),
                actor,
            )
            .await?;

        Ok(updated)
    }

    /// Generic partial update for the descriptive fields; status and truck
    /// reference are untouchable here.
    #[instrument(skip(self, request), fields(quote_id = %id))]
    pub async fn update_quote(
        &self,
        id: &str,
        request: UpdateQuoteRequest,
        actor: &str,
    ) -> Result<Quote, ServiceError> {
        self.get_quote(id).await?;

        if let Some(amount) = request.amount {
            require_non_negative(amount, "amount")?;
        }

        let mut patch = Map::new();
        if let Some(name) = request.name {
            patch.insert("name".into(), json!(name));
        }
        if let Some(origin) = request.origin {
            patch.insert("origin".into(), json!(origin));
        }
        if let Some(dest) = request.dest {
            patch.insert("dest".into(), json!(dest));
        }
        if let Some(date) = request.date {
            patch.insert("date".into(), json!(date));
        }
        if let Some(time) = request.time {
            patch.insert("time".into(), json!(time));
        }
        if let Some(amount) = request.amount {
            patch.insert("amount".into(), json!(amount));
        }

        let updated = self.patch_quote(id, Value::Object(patch)).await?;

        self.activity
            .log(
                "Quote Updated",
                format!("Quote for {} updated", updated.name),
                actor,
            )
            .await?;

        Ok(updated)
    }

    /// Unconditional removal; referenced trucks are untouched.
    #[instrument(skip(self), fields(quote_id = %id))]
    pub async fn delete_quote(&self, id: &str, actor: &str) -> Result<(), ServiceError> {
        let quote = self.get_quote(id).await?;
        self.store.remove(Collection::Quotes, id).await?;

        info!(quote_id = %id, "quote deleted");
        self.activity
            .log(
                "Quote Deleted",
                format!("Quote for {} deleted", quote.name),
                actor,
            )
            .await?;
        Ok(())
    }

    /// The move schedule: all Approved quotes in insertion order.
    /// Recomputed on every call, never cached.
    pub async fn schedule(&self) -> Result<Vec<Quote>, ServiceError> {
        let quotes: Vec<Quote> = self.store.list(Collection::Quotes).await?;
        Ok(quotes
            .into_iter()
            .filter(|q| q.status == QuoteStatus::Approved)
            .collect())
    }

    async fn patch_quote(&self, id: &str, patch: Value) -> Result<Quote, ServiceError> {
        self.store
            .patch(Collection::Quotes, id, patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Quote {} not found", id)))
    }
}

fn require_non_negative(amount: Decimal, field: &str) -> Result<(), ServiceError> {
    if amount.is_sign_negative() {
        return Err(ServiceError::ValidationError(format!(
            "{} must not be negative",
            field
        )));
    }
    Ok(())
}
