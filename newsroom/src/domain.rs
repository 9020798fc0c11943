use serde::{Deserialize, Serialize};

pub type TermId = u64;
pub type ItemId = u64;

/// Content type of the items the news resource exposes
pub const NEWS_TYPE: &str = "news";

/// Upper bound on a derived summary, in characters
pub const SUMMARY_MAX_CHARS: usize = 600;

pub mod request {
    use serde::Deserialize;

    /// Query string of the news resource
    #[derive(Clone, Debug, Default, Deserialize)]
    pub struct NewsQuery {
        #[serde(default)]
        pub tags: Option<String>,
    }

    impl NewsQuery {
        /// Build from decoded query pairs. A repeated `tags` keeps its last value.
        pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
            Self {
                tags: pairs
                    .into_iter()
                    .filter(|(key, _)| key == "tags")
                    .map(|(_, value)| value)
                    .last(),
            }
        }
    }
}

pub mod response {
    use super::NewsRecord;
    use serde_json::{Value, json};

    pub const NO_NEWS_MESSAGE: &str = "No news for the Tag was found.";
    pub const NEWS_LIST_CACHE_TAG: &str = "node_list:news";
    pub const URL_CACHE_CONTEXT: &str = "url";
    pub const SECRET_KEY_HEADER: &str = "secret_key";

    #[derive(Clone, Debug, PartialEq)]
    pub enum LookupOutcome {
        /// None of the requested names resolved to a term
        NoTagsFound,
        Found(Vec<NewsRecord>),
    }

    /// Cacheability declared by a response. Tags name the data the response
    /// was built from, contexts name the request dimensions it varies by.
    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    pub struct CacheMetadata {
        pub tags: Vec<String>,
        pub contexts: Vec<String>,
    }

    impl CacheMetadata {
        pub fn add_cache_tags<I, S>(&mut self, tags: I)
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            for tag in tags {
                let tag = tag.into();
                if !self.tags.contains(&tag) {
                    self.tags.push(tag);
                }
            }
        }

        pub fn add_cache_contexts<I, S>(&mut self, contexts: I)
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            for context in contexts {
                let context = context.into();
                if !self.contexts.contains(&context) {
                    self.contexts.push(context);
                }
            }
        }
    }

    /// Transport-neutral response produced by the news resource. The status is
    /// always 200; callers tell success from failure by the body shape.
    #[derive(Clone, Debug, PartialEq)]
    pub struct ResourceResponse {
        pub status: u16,
        pub body: Value,
        pub cache: Option<CacheMetadata>,
        pub headers: Vec<(String, String)>,
    }

    impl ResourceResponse {
        pub fn new(body: Value) -> Self {
            Self {
                status: 200,
                body,
                cache: None,
                headers: Vec::new(),
            }
        }

        pub fn error(message: impl Into<String>) -> Self {
            Self::new(json!({ "error": message.into() }))
        }

        pub fn not_found() -> Self {
            Self::error(NO_NEWS_MESSAGE)
        }

        pub fn add_cacheable_dependency(&mut self, metadata: CacheMetadata) {
            let cache = self.cache.get_or_insert_with(CacheMetadata::default);
            cache.add_cache_tags(metadata.tags);
            cache.add_cache_contexts(metadata.contexts);
        }

        pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
            let name = name.into();
            let value = value.into();
            match self.headers.iter_mut().find(|(n, _)| *n == name) {
                Some(existing) => existing.1 = value,
                None => self.headers.push((name, value)),
            }
        }

        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        }

        pub fn error_message(&self) -> Option<&str> {
            self.body.get("error").and_then(Value::as_str)
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub term_id: TermId,
    pub name: String,
}

impl Tag {
    pub fn new(term_id: TermId, name: impl Into<String>) -> Self {
        Self {
            term_id,
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub target_id: u64,
    pub alt_text: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub value: String,
    #[serde(default)]
    pub summary: String,
}

impl Body {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            summary: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// The stored summary, or one derived from the first paragraph of the value
    pub fn summary(&self) -> String {
        if !self.summary.trim().is_empty() {
            return self.summary.clone();
        }
        derive_summary(&self.value)
    }
}

fn derive_summary(value: &str) -> String {
    let end = [value.find("</p>"), value.find("\n\n")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(value.len());

    let mut text = String::with_capacity(end);
    let mut in_markup = false;
    for ch in value[..end].chars() {
        match ch {
            '<' => in_markup = true,
            '>' if in_markup => in_markup = false,
            _ if !in_markup => text.push(ch),
            _ => {}
        }
    }
    let text = text.trim();

    if text.chars().count() <= SUMMARY_MAX_CHARS {
        return text.to_string();
    }

    let cut: String = text.chars().take(SUMMARY_MAX_CHARS).collect();
    match cut.rfind(char::is_whitespace) {
        Some(idx) => cut[..idx].trim_end().to_string(),
        None => cut,
    }
}

fn default_published() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    #[serde(default)]
    pub body: Body,
    /// Single taxonomy reference per item
    pub tag: TermId,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub published_date: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

impl ContentItem {
    pub fn news(id: ItemId, title: impl Into<String>, tag: TermId) -> Self {
        Self {
            id,
            content_type: NEWS_TYPE.to_string(),
            title: title.into(),
            body: Body::default(),
            tag,
            images: Vec::new(),
            published_date: String::new(),
            published: true,
        }
    }
}

/// Filter handed to a content store
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemQuery {
    pub content_type: String,
    pub tag_ids: Vec<TermId>,
    /// When false the store must not filter on publication status
    pub access_check: bool,
}

impl ItemQuery {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            tag_ids: Vec::new(),
            access_check: true,
        }
    }

    pub fn tag_in(mut self, tag_ids: impl IntoIterator<Item = TermId>) -> Self {
        for id in tag_ids {
            if !self.tag_ids.contains(&id) {
                self.tag_ids.push(id);
            }
        }
        self
    }

    pub fn access_check(mut self, enabled: bool) -> Self {
        self.access_check = enabled;
        self
    }

    pub fn matches(&self, item: &ContentItem) -> bool {
        item.content_type == self.content_type
            && self.tag_ids.contains(&item.tag)
            && (!self.access_check || item.published)
    }
}

/// One entry of the news resource response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub title: String,
    #[serde(rename = "body")]
    pub body_raw: String,
    #[serde(rename = "summary")]
    pub body_summary: String,
    #[serde(rename = "tags")]
    pub tag_name: String,
    pub images: Vec<Image>,
    pub views: u64,
    #[serde(rename = "Published Date")]
    pub published_date: String,
}

/// Counters after a view was recorded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewTally {
    pub total: u64,
    pub day: u64,
    pub session: u64,
    pub first_view: bool,
}
