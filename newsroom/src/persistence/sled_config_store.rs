use crate::ports::ConfigStore;
use async_trait::async_trait;
use shared::{Error, Result};
use sled::Db;
use std::path::Path;

/// Sled-based configuration storage, one tree per bucket
#[derive(Clone)]
pub struct SledConfigStore {
    db: Db,
}

impl SledConfigStore {
    /// Creates the parent directory if it doesn't exist
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Internal(format!("Failed to create directory: {}", e)))?;
        }

        let db = sled::open(path)
            .map_err(|e| Error::Storage(format!("Failed to open Sled database: {}", e)))?;

        Ok(Self { db })
    }

    pub fn from_db(db: Db) -> Self {
        Self { db }
    }

    fn bucket(&self, bucket: &str) -> Result<sled::Tree> {
        self.db
            .open_tree(format!("config:{}", bucket))
            .map_err(|e| Error::Storage(format!("Failed to open config bucket {}: {}", bucket, e)))
    }
}

#[async_trait]
impl ConfigStore for SledConfigStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<String>> {
        let value = self
            .bucket(bucket)?
            .get(key.as_bytes())
            .map_err(|e| Error::Storage(format!("Failed to read config: {}", e)))?;

        match value {
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map(Some)
                .map_err(|e| Error::Serialization(format!("Config value is not UTF-8: {}", e))),
            None => Ok(None),
        }
    }

    async fn save(&self, bucket: &str, values: &[(String, String)]) -> Result<()> {
        let tree = self.bucket(bucket)?;

        let mut batch = sled::Batch::default();
        for (key, value) in values {
            batch.insert(key.as_bytes(), value.as_bytes());
        }

        tree.apply_batch(batch)
            .map_err(|e| Error::Storage(format!("Failed to save config: {}", e)))?;

        tree.flush()
            .map_err(|e| Error::Storage(format!("Failed to flush config: {}", e)))?;

        Ok(())
    }
}
