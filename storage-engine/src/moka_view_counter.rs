use async_trait::async_trait;
use dashmap::DashMap;
use moka::future::Cache;
use newsroom::domain::{ItemId, ViewTally};
use newsroom::ports::ViewCounter;
use shared::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

type SessionKey = (ItemId, String);

/// Moka-based view statistics.
///
/// Day counts live in a cache whose entries expire `window` after the first
/// view of the item, so a fresh window starts with the next view. Session
/// counts idle out after `session_ttl`. Totals never expire.
pub struct MokaViewCounter {
    day_counts: Cache<ItemId, Arc<AtomicU64>>,
    session_counts: Cache<SessionKey, Arc<AtomicU64>>,
    totals: DashMap<ItemId, u64>,
}

impl MokaViewCounter {
    pub fn new(window: Duration, session_ttl: Duration) -> Self {
        Self {
            day_counts: Cache::builder().time_to_live(window).build(),
            session_counts: Cache::builder().time_to_idle(session_ttl).build(),
            totals: DashMap::new(),
        }
    }

    /// Create with default settings (one day window, 1 hour sessions)
    pub fn with_defaults() -> Self {
        Self::new(Duration::from_secs(86_400), Duration::from_secs(3600))
    }

    pub fn total_count(&self, item: ItemId) -> u64 {
        self.totals.get(&item).map(|t| *t).unwrap_or(0)
    }
}

#[async_trait]
impl ViewCounter for MokaViewCounter {
    async fn day_count(&self, item: ItemId) -> Result<u64> {
        Ok(self
            .day_counts
            .get(&item)
            .await
            .map(|count| count.load(Ordering::SeqCst))
            .unwrap_or(0))
    }

    async fn record_view(&self, item: ItemId, session: &str) -> Result<ViewTally> {
        let day = self
            .day_counts
            .get_with(item, async { Arc::new(AtomicU64::new(0)) })
            .await
            .fetch_add(1, Ordering::SeqCst)
            + 1;

        let session_count = self
            .session_counts
            .get_with((item, session.to_string()), async { Arc::new(AtomicU64::new(0)) })
            .await
            .fetch_add(1, Ordering::SeqCst)
            + 1;

        let total = {
            let mut entry = self.totals.entry(item).or_insert(0);
            *entry += 1;
            *entry
        };

        let first_view = session_count == 1;
        if first_view {
            info!("Session '{}' viewed item {} for the first time", session, item);
        }

        Ok(ViewTally {
            total,
            day,
            session: session_count,
            first_view,
        })
    }
}
