use thiserror::Error;

/// Failure reported by a [`ContentStore`](crate::ContentStore) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Content store query failed: {0}")]
    Query(String),
    #[error("Content store unavailable: {0}")]
    Unavailable(String),
}

/// Failure to parse a request-time filter name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown content type: '{0}'. Expected one of 'topic', 'category', 'quiz'")]
    ContentType(String),
    #[error("Unknown sort order: '{0}'. Expected 'relevance' or 'lastUpdated'")]
    SortBy(String),
}
