use super::operation::NewsLookup;
use crate::domain::request::NewsQuery;
use crate::domain::response::{
    CacheMetadata, LookupOutcome, NEWS_LIST_CACHE_TAG, ResourceResponse, SECRET_KEY_HEADER,
    URL_CACHE_CONTEXT,
};
use crate::planes::control::SettingsService;
use std::sync::Arc;
use tracing::{info, warn};

/// The news REST resource: turns a tag query into a `ResourceResponse`.
/// Every outcome is a 200; failures are reported in an `error` body field.
pub struct NewsResource {
    lookup: Arc<dyn NewsLookup>,
    settings: Arc<SettingsService>,
}

impl NewsResource {
    pub fn new(lookup: Arc<dyn NewsLookup>, settings: Arc<SettingsService>) -> Self {
        Self { lookup, settings }
    }

    pub async fn get(&self, query: &NewsQuery) -> ResourceResponse {
        let tags = match query.tags.as_deref() {
            Some(tags) if !tags.is_empty() => tags,
            _ => return ResourceResponse::not_found(),
        };

        let records = match self.lookup.lookup(tags).await {
            Ok(LookupOutcome::Found(records)) => records,
            Ok(LookupOutcome::NoTagsFound) => return ResourceResponse::not_found(),
            Err(e) => {
                warn!("News lookup for tags '{}' failed: {}", tags, e);
                return ResourceResponse::error(e.to_string());
            }
        };

        info!("News lookup for tags '{}' returned {} record(s)", tags, records.len());

        let body = match serde_json::to_value(&records) {
            Ok(body) => body,
            Err(e) => return ResourceResponse::error(e.to_string()),
        };

        let mut response = ResourceResponse::new(body);
        let mut cacheable_metadata = CacheMetadata::default();
        cacheable_metadata.add_cache_tags([NEWS_LIST_CACHE_TAG]);
        cacheable_metadata.add_cache_contexts([URL_CACHE_CONTEXT]);
        response.add_cacheable_dependency(cacheable_metadata);

        let secret_key = self.settings.secret_key().await.unwrap_or_else(|e| {
            warn!("Failed to read secret key, sending it empty: {}", e);
            String::new()
        });
        response.set_header(SECRET_KEY_HEADER, secret_key);

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::response::NO_NEWS_MESSAGE;
    use crate::domain::{Image, NewsRecord};
    use crate::planes::control::SettingsService;
    use crate::planes::data::LookupError;
    use crate::persistence::SledConfigStore;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    /// Answers every lookup with a canned outcome and counts calls
    struct CannedLookup {
        outcome: Result<LookupOutcome, LookupError>,
        calls: AtomicUsize,
    }

    impl CannedLookup {
        fn new(outcome: Result<LookupOutcome, LookupError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl NewsLookup for CannedLookup {
        async fn lookup(&self, _tag_query: &str) -> Result<LookupOutcome, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn settings() -> (TempDir, Arc<SettingsService>) {
        let temp_dir = TempDir::new().unwrap();
        let store = SledConfigStore::new(temp_dir.path().join("config.sled")).unwrap();
        (temp_dir, Arc::new(SettingsService::new(Arc::new(store))))
    }

    fn query(tags: Option<&str>) -> NewsQuery {
        NewsQuery {
            tags: tags.map(str::to_string),
        }
    }

    fn launch_record() -> NewsRecord {
        NewsRecord {
            title: "Launch".to_string(),
            body_raw: "Liftoff".to_string(),
            body_summary: "Liftoff".to_string(),
            tag_name: "space".to_string(),
            images: vec![Image {
                target_id: 5,
                alt_text: "rocket".to_string(),
                width: 100,
                height: 50,
            }],
            views: 1,
            published_date: "2024-01-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_missing_or_empty_tags_short_circuit() {
        let (_dir, settings) = settings();
        let lookup = CannedLookup::new(Ok(LookupOutcome::Found(vec![launch_record()])));
        let resource = NewsResource::new(lookup.clone(), settings);

        for q in [query(None), query(Some(""))] {
            let response = resource.get(&q).await;
            assert_eq!(response.status, 200);
            assert_eq!(response.body, json!({ "error": NO_NEWS_MESSAGE }));
            assert!(response.cache.is_none());
            assert!(response.header(SECRET_KEY_HEADER).is_none());
        }
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_tags_found_is_not_found_body() {
        let (_dir, settings) = settings();
        let resource = NewsResource::new(CannedLookup::new(Ok(LookupOutcome::NoTagsFound)), settings);

        let response = resource.get(&query(Some(" "))).await;
        assert_eq!(response.body, json!({ "error": "No news for the Tag was found." }));
        assert!(response.cache.is_none());
        assert!(response.headers.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_error_message_in_body() {
        let (_dir, settings) = settings();
        let error = LookupError::Store(shared::Error::Storage("db down".to_string()));
        let resource = NewsResource::new(CannedLookup::new(Err(error)), settings);

        let response = resource.get(&query(Some("space"))).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({ "error": "storage: db down" }));
        assert_eq!(response.error_message(), Some("storage: db down"));
        assert!(response.cache.is_none());
    }

    #[tokio::test]
    async fn test_success_has_cache_metadata_and_secret_header() {
        let (_dir, settings) = settings();
        let resource = NewsResource::new(
            CannedLookup::new(Ok(LookupOutcome::Found(vec![launch_record()]))),
            settings.clone(),
        );

        let response = resource.get(&query(Some("space"))).await;
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            json!([{
                "title": "Launch",
                "body": "Liftoff",
                "summary": "Liftoff",
                "tags": "space",
                "images": [{ "target_id": 5, "alt_text": "rocket", "width": 100, "height": 50 }],
                "views": 1,
                "Published Date": "2024-01-01"
            }])
        );
        let cache = response.cache.clone().unwrap();
        assert_eq!(cache.tags, vec!["node_list:news".to_string()]);
        assert_eq!(cache.contexts, vec!["url".to_string()]);
        assert_eq!(response.header("secret_key"), Some(""));

        settings.submit("abc123").await.unwrap();
        let response = resource.get(&query(Some("space"))).await;
        assert_eq!(response.header("secret_key"), Some("abc123"));
    }

    #[tokio::test]
    async fn test_repeated_requests_are_identical() {
        let (_dir, settings) = settings();
        let resource = NewsResource::new(
            CannedLookup::new(Ok(LookupOutcome::Found(vec![launch_record()]))),
            settings,
        );

        let first = resource.get(&query(Some("space"))).await;
        let second = resource.get(&query(Some("space"))).await;
        assert_eq!(first, second);
    }
}
