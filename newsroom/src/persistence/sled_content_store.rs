use super::seed::{ContentSeed, ImportSummary};
use crate::domain::{ContentItem, ItemId, ItemQuery, Tag, TermId};
use crate::ports::ContentStore;
use async_trait::async_trait;
use shared::{Error, Result};
use sled::Db;
use std::path::Path;

const TERMS_TREE: &str = "terms";
const TERMS_BY_NAME_TREE: &str = "terms_by_name";
const ITEMS_TREE: &str = "items";

fn storage(action: &str, err: sled::Error) -> Error {
    Error::Storage(format!("Failed to {}: {}", action, err))
}

fn decode<T: serde::de::DeserializeOwned>(what: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| Error::Serialization(format!("Failed to deserialize {}: {}", what, e)))
}

fn encode<T: serde::Serialize>(what: &str, value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| Error::Serialization(format!("Failed to serialize {}: {}", what, e)))
}

/// Sled-backed content store. Ids are stored big-endian, so iteration order
/// is ascending id order.
#[derive(Clone)]
pub struct SledContentStore {
    db: Db,
}

impl SledContentStore {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Internal(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path).map_err(|e| storage("open Sled database", e))?;
        Ok(Self { db })
    }

    /// Share an already opened database (e.g. with `SledConfigStore`)
    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn tree(&self, name: &str) -> Result<sled::Tree> {
        self.db
            .open_tree(name)
            .map_err(|e| storage(&format!("open tree {}", name), e))
    }

    fn term_ids_named(&self, name: &str) -> Result<Vec<TermId>> {
        match self
            .tree(TERMS_BY_NAME_TREE)?
            .get(name.as_bytes())
            .map_err(|e| storage("read term index", e))?
        {
            Some(bytes) => decode("term index", &bytes),
            None => Ok(Vec::new()),
        }
    }

    fn write_name_index(&self, name: &str, ids: &[TermId]) -> Result<()> {
        let index = self.tree(TERMS_BY_NAME_TREE)?;
        if ids.is_empty() {
            index
                .remove(name.as_bytes())
                .map_err(|e| storage("update term index", e))?;
        } else {
            index
                .insert(name.as_bytes(), encode("term index", &ids)?)
                .map_err(|e| storage("update term index", e))?;
        }
        Ok(())
    }

    pub fn put_term(&self, tag: &Tag) -> Result<()> {
        let terms = self.tree(TERMS_TREE)?;
        let previous = terms
            .insert(tag.term_id.to_be_bytes(), encode("term", tag)?)
            .map_err(|e| storage("save term", e))?;

        if let Some(bytes) = previous {
            let old: Tag = decode("term", &bytes)?;
            if old.name != tag.name {
                let mut ids = self.term_ids_named(&old.name)?;
                ids.retain(|id| *id != old.term_id);
                self.write_name_index(&old.name, &ids)?;
            }
        }

        let mut ids = self.term_ids_named(&tag.name)?;
        if !ids.contains(&tag.term_id) {
            ids.push(tag.term_id);
            self.write_name_index(&tag.name, &ids)?;
        }
        Ok(())
    }

    pub fn remove_term(&self, id: TermId) -> Result<bool> {
        let removed = self
            .tree(TERMS_TREE)?
            .remove(id.to_be_bytes())
            .map_err(|e| storage("delete term", e))?;

        match removed {
            Some(bytes) => {
                let old: Tag = decode("term", &bytes)?;
                let mut ids = self.term_ids_named(&old.name)?;
                ids.retain(|existing| *existing != id);
                self.write_name_index(&old.name, &ids)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn put_item(&self, item: &ContentItem) -> Result<()> {
        self.tree(ITEMS_TREE)?
            .insert(item.id.to_be_bytes(), encode("item", item)?)
            .map_err(|e| storage("save item", e))?;
        Ok(())
    }

    pub fn remove_item(&self, id: ItemId) -> Result<bool> {
        Ok(self
            .tree(ITEMS_TREE)?
            .remove(id.to_be_bytes())
            .map_err(|e| storage("delete item", e))?
            .is_some())
    }

    /// Upsert every term and item of the seed, then flush
    pub fn import(&self, seed: &ContentSeed) -> Result<ImportSummary> {
        for tag in &seed.terms {
            self.put_term(tag)?;
        }
        for item in &seed.items {
            self.put_item(item)?;
        }

        self.db
            .flush()
            .map_err(|e| storage("flush database", e))?;

        Ok(ImportSummary {
            terms: seed.terms.len(),
            items: seed.items.len(),
        })
    }
}

#[async_trait]
impl ContentStore for SledContentStore {
    async fn terms_by_names(&self, names: &[String]) -> Result<Vec<Tag>> {
        let mut tags: Vec<Tag> = Vec::new();
        for name in names {
            for id in self.term_ids_named(name)? {
                if tags.iter().any(|t| t.term_id == id) {
                    continue;
                }
                if let Some(tag) = self.term(id).await? {
                    tags.push(tag);
                }
            }
        }
        Ok(tags)
    }

    async fn term(&self, id: TermId) -> Result<Option<Tag>> {
        match self
            .tree(TERMS_TREE)?
            .get(id.to_be_bytes())
            .map_err(|e| storage("load term", e))?
        {
            Some(bytes) => Ok(Some(decode("term", &bytes)?)),
            None => Ok(None),
        }
    }

    async fn query_items(&self, query: &ItemQuery) -> Result<Vec<ItemId>> {
        let mut ids = Vec::new();
        for entry in self.tree(ITEMS_TREE)?.iter() {
            let (_, value) = entry.map_err(|e| storage("iterate items", e))?;
            let item: ContentItem = decode("item", &value)?;
            if query.matches(&item) {
                ids.push(item.id);
            }
        }
        Ok(ids)
    }

    async fn load_items(&self, ids: &[ItemId]) -> Result<Vec<ContentItem>> {
        let items = self.tree(ITEMS_TREE)?;
        let mut loaded = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(bytes) = items
                .get(id.to_be_bytes())
                .map_err(|e| storage("load item", e))?
            {
                loaded.push(decode("item", &bytes)?);
            }
        }
        Ok(loaded)
    }
}
