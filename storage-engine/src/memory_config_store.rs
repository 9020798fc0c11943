use async_trait::async_trait;
use dashmap::DashMap;
use newsroom::ports::ConfigStore;
use shared::Result;

/// Process-local config store; values are lost on restart
#[derive(Default)]
pub struct MemoryConfigStore {
    values: DashMap<(String, String), String>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<String>> {
        Ok(self
            .values
            .get(&(bucket.to_string(), key.to_string()))
            .map(|v| v.value().clone()))
    }

    async fn save(&self, bucket: &str, values: &[(String, String)]) -> Result<()> {
        for (key, value) in values {
            self.values
                .insert((bucket.to_string(), key.clone()), value.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom::planes::control::{SETTINGS_BUCKET, SECRET_KEY, SettingsService};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_buckets_are_isolated() {
        let store = MemoryConfigStore::new();
        store
            .save("a", &[("k".to_string(), "1".to_string())])
            .await
            .unwrap();

        assert_eq!(store.get("a", "k").await.unwrap(), Some("1".to_string()));
        assert_eq!(store.get("b", "k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let store = Arc::new(MemoryConfigStore::new());
        let settings = SettingsService::new(store.clone());

        settings.submit("abc123").await.unwrap();
        assert_eq!(
            store.get(SETTINGS_BUCKET, SECRET_KEY).await.unwrap(),
            Some("abc123".to_string())
        );
    }
}
