#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use newsroom::domain::{Body as ItemBody, ContentItem, Image, ItemId, ItemQuery, Tag, TermId};
use newsroom::persistence::ContentSeed;
use newsroom::ports::{ContentStore, ViewCounter};
use serde_json::Value;
use server_http::{build_router, App, AppState};
use shared::config::Config;
use std::sync::Arc;
use storage_engine::{MemoryConfigStore, MemoryContentStore, MokaViewCounter};
use tower::ServiceExt;

pub struct TestApp {
    pub router: App,
    pub content: Arc<MemoryContentStore>,
    pub views: Arc<MokaViewCounter>,
}

pub fn launch_item() -> ContentItem {
    let mut item = ContentItem::news(1, "Launch", 10);
    item.body = ItemBody::new("<p>Liftoff at dawn.</p>").with_summary("Liftoff");
    item.images = vec![Image {
        target_id: 5,
        alt_text: "rocket".to_string(),
        width: 100,
        height: 50,
    }];
    item.published_date = "2024-01-01".to_string();
    item
}

pub fn seed() -> ContentSeed {
    let mut page = ContentItem::news(4, "About", 10);
    page.content_type = "page".to_string();

    ContentSeed {
        terms: vec![
            Tag::new(10, "space"),
            Tag::new(11, "science"),
            Tag::new(12, "weather"),
        ],
        items: vec![launch_item(), ContentItem::news(2, "Comet", 11), page],
    }
}

pub async fn test_app() -> TestApp {
    let content = Arc::new(MemoryContentStore::from_seed(seed()));
    let views = Arc::new(MokaViewCounter::with_defaults());
    views.record_view(1, "seed-session").await.unwrap();

    let state = AppState::new(
        content.clone(),
        views.clone(),
        Arc::new(MemoryConfigStore::new()),
    );

    TestApp {
        router: build_router(state, &Config::default()),
        content,
        views,
    }
}

/// Content store whose item queries always fail
pub struct BrokenContentStore;

#[async_trait]
impl ContentStore for BrokenContentStore {
    async fn terms_by_names(&self, names: &[String]) -> shared::Result<Vec<Tag>> {
        Ok(names
            .iter()
            .enumerate()
            .map(|(i, name)| Tag::new(i as TermId, name.clone()))
            .collect())
    }

    async fn term(&self, _id: TermId) -> shared::Result<Option<Tag>> {
        Ok(None)
    }

    async fn query_items(&self, _query: &ItemQuery) -> shared::Result<Vec<ItemId>> {
        Err(shared::Error::Storage("table node_field_data is locked".to_string()))
    }

    async fn load_items(&self, _ids: &[ItemId]) -> shared::Result<Vec<ContentItem>> {
        Ok(Vec::new())
    }
}

pub fn broken_app() -> App {
    let state = AppState::new(
        Arc::new(BrokenContentStore),
        Arc::new(MokaViewCounter::with_defaults()),
        Arc::new(MemoryConfigStore::new()),
    );
    build_router(state, &Config::default())
}

pub async fn send_raw(router: &App, request: Request<Body>) -> (StatusCode, HeaderMap, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, body.to_vec())
}

pub async fn send(router: &App, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let (status, headers, body) = send_raw(router, request).await;
    let json = serde_json::from_slice(&body).expect("json body");
    (status, headers, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}
