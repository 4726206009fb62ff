use chrono::Utc;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::ActivityEntry;
use crate::store::{Collection, Store};

/// Default number of entries returned by the activity feed.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 50;

/// Append-only audit log. Every mutating operation on quotes, claims and
/// trucks records an entry before its response is produced; entries are
/// never updated or deleted individually, only cleared in bulk.
#[derive(Clone)]
pub struct ActivityLogger {
    store: Store,
}

impl ActivityLogger {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn log(&self, action: &str, details: String, user: &str) -> Result<(), ServiceError> {
        let entry = ActivityEntry {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            details,
            user: user.to_string(),
            time: Utc::now(),
        };
        self.store.insert(Collection::Activities, &entry).await?;
        Ok(())
    }

    /// Newest-first slice of the log.
    pub async fn recent(&self, limit: usize) -> Result<Vec<ActivityEntry>, ServiceError> {
        let mut entries: Vec<ActivityEntry> = self.store.list(Collection::Activities).await?;
        entries.reverse();
        entries.truncate(limit);
        Ok(entries)
    }

    pub async fn clear(&self) -> Result<(), ServiceError> {
        self.store.clear(Collection::Activities).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    fn logger() -> ActivityLogger {
        ActivityLogger::new(Store::new(Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_capped() {
        let log = logger();
        for n in 0..60 {
            log.log("Quote Created", format!("quote {n}"), "admin")
                .await
                .unwrap();
        }

        let entries = log.recent(DEFAULT_ACTIVITY_LIMIT).await.unwrap();
        assert_eq!(entries.len(), 50);
        assert_eq!(entries[0].details, "quote 59");
        assert_eq!(entries[49].details, "quote 10");
    }

    #[tokio::test]
    async fn clear_empties_the_log() {
        let log = logger();
        log.log("Truck Added", "Truck T-1 added".into(), "admin")
            .await
            .unwrap();
        log.clear().await.unwrap();
        assert!(log.recent(10).await.unwrap().is_empty());
    }
}
