//! Read interface over the content backend.
//!
//! The search subsystem never talks to a database directly. It consumes the
//! three bulk reads below, each of which may fail independently.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::StoreError,
    model::{CategoryRecord, SectionRecord, TopicRecord},
};

/// Bulk read access to handbook content
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn get_all_topics(&self) -> Result<Vec<TopicRecord>, StoreError>;

    async fn get_all_categories(&self) -> Result<Vec<CategoryRecord>, StoreError>;

    async fn get_all_sections(&self) -> Result<Vec<SectionRecord>, StoreError>;
}

/// In-memory content store
///
/// Counts every load so callers can assert how often the backend was hit,
/// and can be told to fail topic or category loads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    topics: RwLock<Vec<TopicRecord>>,
    categories: RwLock<Vec<CategoryRecord>>,
    sections: RwLock<Vec<SectionRecord>>,
    fail_topics: bool,
    fail_categories: bool,
    topic_loads: AtomicUsize,
    category_loads: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_topics(mut self, topics: Vec<TopicRecord>) -> Self {
        self.topics = RwLock::new(topics);
        self
    }

    pub fn with_categories(mut self, categories: Vec<CategoryRecord>) -> Self {
        self.categories = RwLock::new(categories);
        self
    }

    pub fn with_sections(mut self, sections: Vec<SectionRecord>) -> Self {
        self.sections = RwLock::new(sections);
        self
    }

    /// Make every topic load fail with [`StoreError::Unavailable`]
    pub fn failing_topics(mut self) -> Self {
        self.fail_topics = true;
        self
    }

    /// Make every category load fail with [`StoreError::Unavailable`]
    pub fn failing_categories(mut self) -> Self {
        self.fail_categories = true;
        self
    }

    /// Swap the stored topics, visible to the next load
    pub async fn replace_topics(&self, topics: Vec<TopicRecord>) {
        *self.topics.write().await = topics;
    }

    /// Number of `get_all_topics` calls so far, failed ones included
    pub fn topic_loads(&self) -> usize {
        self.topic_loads.load(Ordering::SeqCst)
    }

    /// Number of `get_all_categories` calls so far, failed ones included
    pub fn category_loads(&self) -> usize {
        self.category_loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn get_all_topics(&self) -> Result<Vec<TopicRecord>, StoreError> {
        self.topic_loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_topics {
            return Err(StoreError::Unavailable("topics".to_string()));
        }
        Ok(self.topics.read().await.clone())
    }

    async fn get_all_categories(&self) -> Result<Vec<CategoryRecord>, StoreError> {
        self.category_loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_categories {
            return Err(StoreError::Unavailable("categories".to_string()));
        }
        Ok(self.categories.read().await.clone())
    }

    async fn get_all_sections(&self) -> Result<Vec<SectionRecord>, StoreError> {
        Ok(self.sections.read().await.clone())
    }
}
