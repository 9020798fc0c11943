use crate::domain::{ItemId, TermId};
use thiserror::Error;

/// Failure of a whole lookup batch. The display text is handed to API clients.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Tag {term} referenced by news item {item} could not be loaded")]
    UnresolvedTag { item: ItemId, term: TermId },

    #[error("{0}")]
    Store(#[from] shared::Error),
}
