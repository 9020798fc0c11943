use async_trait::async_trait;
use newsroom::domain::{ContentItem, ItemId, ItemQuery, Tag, TermId};
use newsroom::persistence::ContentSeed;
use newsroom::ports::ContentStore;
use shared::Result;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Contents {
    terms: BTreeMap<TermId, Tag>,
    items: BTreeMap<ItemId, ContentItem>,
}

/// In-memory content store, iterating items in ascending id order
#[derive(Default)]
pub struct MemoryContentStore {
    contents: RwLock<Contents>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: ContentSeed) -> Self {
        let contents = Contents {
            terms: seed.terms.into_iter().map(|t| (t.term_id, t)).collect(),
            items: seed.items.into_iter().map(|i| (i.id, i)).collect(),
        };
        Self {
            contents: RwLock::new(contents),
        }
    }

    pub async fn insert_term(&self, tag: Tag) {
        self.contents.write().await.terms.insert(tag.term_id, tag);
    }

    pub async fn remove_term(&self, id: TermId) -> bool {
        self.contents.write().await.terms.remove(&id).is_some()
    }

    pub async fn insert_item(&self, item: ContentItem) {
        self.contents.write().await.items.insert(item.id, item);
    }

    pub async fn remove_item(&self, id: ItemId) -> bool {
        self.contents.write().await.items.remove(&id).is_some()
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn terms_by_names(&self, names: &[String]) -> Result<Vec<Tag>> {
        let contents = self.contents.read().await;
        Ok(contents
            .terms
            .values()
            .filter(|tag| names.iter().any(|name| *name == tag.name))
            .cloned()
            .collect())
    }

    async fn term(&self, id: TermId) -> Result<Option<Tag>> {
        Ok(self.contents.read().await.terms.get(&id).cloned())
    }

    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<ItemId>> {
        let contents = self.contents.read().await;
        Ok(contents
            .items
            .values()
            .filter(|item| query.matches(item))
            .map(|item| item.id)
            .collect())
    }

    async fn load_items(&self, ids: &[ItemId]) -> Result<Vec<ContentItem>> {
        let contents = self.contents.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| contents.items.get(id).cloned())
            .collect())
    }
}
