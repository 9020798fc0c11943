#![deny(clippy::all)]

use crate::domain::{ContentItem, ItemId, ItemQuery, Tag, TermId, ViewTally};
use async_trait::async_trait;
use shared::Result;

// Ports are the narrow interfaces the core consumes; storage adapters live in
// `persistence` (sled) and the `storage-engine` crate (in-memory).

/// Port for content items and their taxonomy terms
#[async_trait]
pub trait ContentStore: Send + Sync + 'static {
    /// Terms whose name exactly matches one of `names`. Several terms may share a name.
    async fn terms_by_names(&self, names: &[String]) -> Result<Vec<Tag>>;

    async fn term(&self, id: TermId) -> Result<Option<Tag>>;

    /// Ids of matching items, in the store's natural order
    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<ItemId>>;

    /// Load items by id, preserving the order of `ids` and skipping unknown ids
    async fn load_items(&self, ids: &[ItemId]) -> Result<Vec<ContentItem>>;

    async fn item_exists(&self, id: ItemId) -> Result<bool> {
        Ok(!self.load_items(&[id]).await?.is_empty())
    }
}

/// Port for per-item view statistics
#[async_trait]
pub trait ViewCounter: Send + Sync + 'static {
    /// Views recorded for the item within the current day window
    async fn day_count(&self, item: ItemId) -> Result<u64>;

    async fn record_view(&self, item: ItemId, session: &str) -> Result<ViewTally>;
}

/// Port for bucketed key/value configuration
#[async_trait]
pub trait ConfigStore: Send + Sync + 'static {
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<String>>;

    /// Persist all `values` in `bucket` as one write
    async fn save(&self, bucket: &str, values: &[(String, String)]) -> Result<()>;
}
