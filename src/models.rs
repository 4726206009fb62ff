//! Typed records for every store collection.
//!
//! Wire field names follow the dashboard's existing JSON documents
//! (camelCase for multi-word fields), so a flat-file data directory written
//! by an earlier deployment keeps loading. Statuses are tagged variants:
//! transitions go through the lifecycle engines, never raw field writes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle states of a quote. Truck assignment is orthogonal and tracked
/// by `truck_id`, not a state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, strum::Display,
)]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
}

/// Claim review states. `Denied` is terminal; the engine deliberately does
/// not enforce a transition table here (legacy-compatible permissive
/// processing).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, strum::Display,
)]
pub enum ClaimStatus {
    #[default]
    Pending,
    #[serde(rename = "Under Review")]
    #[strum(serialize = "Under Review")]
    UnderReview,
    Approved,
    Denied,
    Settled,
}

/// A customer's move request. `amount` is a provisional estimate while the
/// quote is Pending and becomes authoritative once Approved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub dest: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default)]
    pub amount: Decimal,
    #[serde(default)]
    pub status: QuoteStatus,
    /// By-value reference to a truck's label; deleting the truck does not
    /// cascade here.
    #[serde(default)]
    pub truck_id: Option<String>,
}

/// A fleet vehicle. `truck_id` is the human-readable label shown on the
/// dashboard and referenced by quotes; uniqueness is expected but not
/// enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: String,
    pub truck_id: String,
    #[serde(rename = "type")]
    pub truck_type: String,
    pub capacity: Decimal,
    pub status: String,
}

/// An insurance/damage claim. `settled_amount` is meaningful only once the
/// claim reaches Settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub claim_type: String,
    pub amount: Decimal,
    #[serde(default)]
    pub status: ClaimStatus,
    #[serde(default)]
    pub settled_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub item: String,
    pub category: String,
    pub volume: Decimal,
}

/// Immutable audit-log record; appended by every mutating operation on
/// quotes, claims and trucks, never updated or deleted individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: String,
    pub action: String,
    pub details: String,
    pub user: String,
    pub time: DateTime<Utc>,
}

/// Staff account. Passwords are stored as SHA-256 hex digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn quote_defaults_apply_on_deserialize() {
        let quote: Quote = serde_json::from_value(json!({
            "id": "q1",
            "name": "Acme",
            "origin": "A",
            "dest": "B",
            "date": "2025-01-01"
        }))
        .unwrap();

        assert_eq!(quote.status, QuoteStatus::Pending);
        assert_eq!(quote.amount, Decimal::ZERO);
        assert!(quote.truck_id.is_none());
        assert!(quote.time.is_none());
    }

    #[test]
    fn claim_status_wire_strings() {
        assert_eq!(
            serde_json::to_value(ClaimStatus::UnderReview).unwrap(),
            json!("Under Review")
        );
        let status: ClaimStatus = serde_json::from_value(json!("Settled")).unwrap();
        assert_eq!(status, ClaimStatus::Settled);
    }

    #[test]
    fn truck_uses_legacy_field_names() {
        let truck = Truck {
            id: "t1".into(),
            truck_id: "T-105".into(),
            truck_type: "26ft Box Truck".into(),
            capacity: dec!(1700),
            status: "Available".into(),
        };
        let doc = serde_json::to_value(&truck).unwrap();
        assert_eq!(doc["truckId"], "T-105");
        assert_eq!(doc["type"], "26ft Box Truck");
    }
}
