//! Dashboard statistics, derived from the store on every request.
//!
//! Revenue counts only Approved quotes; the quote total counts every quote
//! regardless of status. Nothing here is cached, so the numbers always
//! agree with the collections they are computed from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::models::{Claim, Quote, QuoteStatus};
use crate::store::{Collection, Store};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    pub quotes: u64,
    pub moves: u64,
    pub revenue: Decimal,
    pub claims: u64,
}

pub async fn dashboard_stats(store: &Store) -> Result<DashboardStats, ServiceError> {
    let quotes: Vec<Quote> = store.list(Collection::Quotes).await?;
    let claims: Vec<Claim> = store.list(Collection::Claims).await?;

    let approved: Vec<&Quote> = quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Approved)
        .collect();

    Ok(DashboardStats {
        quotes: quotes.len() as u64,
        moves: approved.len() as u64,
        revenue: approved.iter().map(|q| q.amount).sum(),
        claims: claims.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ClaimStatus;
    use crate::store::MemoryStore;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use uuid::Uuid;

    fn quote(status: QuoteStatus, amount: Decimal) -> Quote {
        Quote {
            id: Uuid::new_v4().to_string(),
            name: "Acme".into(),
            origin: "A".into(),
            dest: "B".into(),
            date: "2025-01-01".into(),
            time: None,
            amount,
            status,
            truck_id: None,
        }
    }

    #[tokio::test]
    async fn empty_store_yields_all_zeroes() {
        let store = Store::new(Arc::new(MemoryStore::new()));
        let stats = dashboard_stats(&store).await.unwrap();
        assert_eq!(
            stats,
            DashboardStats {
                quotes: 0,
                moves: 0,
                revenue: Decimal::ZERO,
                claims: 0,
            }
        );
    }

    #[tokio::test]
    async fn revenue_sums_approved_quotes_only() {
        let store = Store::new(Arc::new(MemoryStore::new()));
        store
            .insert(Collection::Quotes, &quote(QuoteStatus::Pending, dec!(9999)))
            .await
            .unwrap();
        store
            .insert(Collection::Quotes, &quote(QuoteStatus::Approved, dec!(5000)))
            .await
            .unwrap();
        store
            .insert(Collection::Quotes, &quote(QuoteStatus::Approved, dec!(2500)))
            .await
            .unwrap();
        store
            .insert(
                Collection::Claims,
                &Claim {
                    id: Uuid::new_v4().to_string(),
                    name: "Jane".into(),
                    claim_type: "Damaged Item".into(),
                    amount: dec!(800),
                    status: ClaimStatus::Pending,
                    settled_amount: Decimal::ZERO,
                    notes: None,
                    updated_at: Utc::now(),
                },
            )
            .await
            .unwrap();

        let stats = dashboard_stats(&store).await.unwrap();
        assert_eq!(stats.quotes, 3);
        assert_eq!(stats.moves, 2);
        assert_eq!(stats.revenue, dec!(7500));
        assert_eq!(stats.claims, 1);
    }
}
