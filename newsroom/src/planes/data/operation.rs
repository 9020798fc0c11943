use super::error::LookupError;
use crate::domain::response::LookupOutcome;
use async_trait::async_trait;

/// Tag-filtered news lookup
#[async_trait]
pub trait NewsLookup: Send + Sync + 'static {
    /// `tag_query` holds one or more whitespace separated tag names
    async fn lookup(&self, tag_query: &str) -> Result<LookupOutcome, LookupError>;
}
