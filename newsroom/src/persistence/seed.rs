use crate::domain::{ContentItem, Tag};
use serde::{Deserialize, Serialize};
use shared::{Error, Result};
use std::path::Path;

/// Terms and items to load into a content store, read from JSON
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContentSeed {
    #[serde(default)]
    pub terms: Vec<Tag>,
    #[serde(default)]
    pub items: Vec<ContentItem>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub terms: usize,
    pub items: usize,
}

impl ContentSeed {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path)
            .map_err(|e| Error::Internal(format!("Failed to read seed {}: {}", path.display(), e)))?;
        Self::from_slice(&raw)
    }

    pub fn from_slice(raw: &[u8]) -> Result<Self> {
        serde_json::from_slice(raw)
            .map_err(|e| Error::Serialization(format!("Failed to parse seed: {}", e)))
    }
}
