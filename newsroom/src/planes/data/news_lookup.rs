use super::error::LookupError;
use super::operation::NewsLookup;
use crate::domain::response::LookupOutcome;
use crate::domain::{ContentItem, ItemQuery, NEWS_TYPE, NewsRecord, Tag, TermId};
use crate::ports::{ContentStore, ViewCounter};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Resolves tag names to terms and builds news records for the items
/// tagged with any of them.
///
/// The item query runs with access checks disabled, so unpublished news is
/// returned as well. The endpoint is meant for anonymous consumers and the
/// trust boundary sits with whoever exposes it.
pub struct TagLookupService {
    content: Arc<dyn ContentStore>,
    views: Arc<dyn ViewCounter>,
}

impl TagLookupService {
    pub fn new(content: Arc<dyn ContentStore>, views: Arc<dyn ViewCounter>) -> Self {
        Self { content, views }
    }

    fn tag_names(tag_query: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for name in tag_query.split_whitespace() {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    async fn news_details(&self, terms: &[Tag]) -> Result<Vec<NewsRecord>, LookupError> {
        let query = ItemQuery::new(NEWS_TYPE)
            .tag_in(terms.iter().map(|t| t.term_id))
            .access_check(false);

        let mut seen = HashSet::new();
        let ids: Vec<_> = self
            .content
            .query_items(&query)
            .await?
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        debug!("{} news item(s) matched terms {:?}", ids.len(), query.tag_ids);

        let items = self.content.load_items(&ids).await?;
        let mut tag_names: HashMap<TermId, String> = HashMap::new();
        let mut records = Vec::with_capacity(items.len());

        for item in items {
            let tag_name = match tag_names.get(&item.tag) {
                Some(name) => name.clone(),
                None => {
                    let tag = self.content.term(item.tag).await?.ok_or(
                        LookupError::UnresolvedTag {
                            item: item.id,
                            term: item.tag,
                        },
                    )?;
                    tag_names.insert(tag.term_id, tag.name.clone());
                    tag.name
                }
            };
            let views = self.views.day_count(item.id).await?;
            records.push(Self::record(item, tag_name, views));
        }

        Ok(records)
    }

    fn record(item: ContentItem, tag_name: String, views: u64) -> NewsRecord {
        NewsRecord {
            body_summary: item.body.summary(),
            body_raw: item.body.value,
            title: item.title,
            tag_name,
            images: item.images,
            views,
            published_date: item.published_date,
        }
    }
}

#[async_trait]
impl NewsLookup for TagLookupService {
    async fn lookup(&self, tag_query: &str) -> Result<LookupOutcome, LookupError> {
        let names = Self::tag_names(tag_query);
        if names.is_empty() {
            return Ok(LookupOutcome::NoTagsFound);
        }

        let terms = self.content.terms_by_names(&names).await?;
        if terms.is_empty() {
            debug!("No terms named {:?}", names);
            return Ok(LookupOutcome::NoTagsFound);
        }

        self.news_details(&terms).await.map(LookupOutcome::Found)
    }
}
