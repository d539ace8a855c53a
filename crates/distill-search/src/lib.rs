//! Global search library for Distill
//!
//! This crate holds the search subsystem behind the handbook, topic and quiz
//! pages: an index rebuilt from the content store on every call, a tiered
//! text relevance scorer, and the orchestrator that filters, sorts and buckets
//! results by content type.

pub mod category;
pub mod error;
pub mod index;
pub mod model;
pub mod scoring;
pub mod search;
pub mod store;

pub use category::{CategoryMap, resolve_categories};
pub use error::{ParseError, StoreError};
pub use index::{SearchIndex, build_search_index};
pub use model::{
    Category, CategoryRecord, ContentType, Quiz, Scored, SearchFilters, SearchResults,
    Section, SectionRecord, SortBy, Topic, TopicRecord,
};
pub use scoring::score_match;
pub use search::perform_global_search;
pub use store::{ContentStore, MemoryStore};
