use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Discriminator attached to every search result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Topic,
    Category,
    Quiz,
}

impl ContentType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Category => "category",
            Self::Quiz => "quiz",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "topic" => Ok(Self::Topic),
            "category" => Ok(Self::Category),
            "quiz" => Ok(Self::Quiz),
            _ => Err(ParseError::ContentType(s.to_string())),
        }
    }
}

/// Ordering applied to each result bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Highest relevance score first
    #[default]
    Relevance,
    /// Most recently updated first, undated entries last
    LastUpdated,
}

impl SortBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::LastUpdated => "lastUpdated",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "lastupdated" | "last_updated" => Ok(Self::LastUpdated),
            _ => Err(ParseError::SortBy(s.to_string())),
        }
    }
}

/// Topic record as returned by the content store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub topic_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    /// ISO-like timestamp, parsed leniently when the index is built
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    /// Opaque handbook payload, may embed a `quiz` array
    #[serde(default)]
    pub content: Value,
}

/// Category record as returned by the content store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Handbook section record as returned by the content store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub section_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: i32,
}

/// Handbook section as served to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    pub position: i32,
}

impl From<SectionRecord> for Section {
    fn from(record: SectionRecord) -> Self {
        Self {
            id: record.section_id,
            title: record.title,
            description: record.description.unwrap_or_default(),
            position: record.position,
        }
    }
}

/// Normalized topic with its denormalized category title
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub difficulty: Option<String>,
    pub read_time: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub category_id: Option<String>,
    /// Empty when the category is unknown or categories failed to load
    pub category_title: String,
    pub content: Value,
}

/// Normalized category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: Option<String>,
    pub color: Option<String>,
    /// Always `None`; categories carry no freshness timestamp
    pub last_updated: Option<DateTime<Utc>>,
}

/// Quiz derived from the `quiz` block of a topic's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// `{topic_id}-quiz`
    pub id: String,
    pub topic_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: Option<String>,
    pub category_id: Option<String>,
    pub category_title: String,
    pub question_count: usize,
    /// Question and option text joined by spaces, matched but never returned
    #[serde(skip_serializing)]
    pub quiz_text: String,
    pub last_updated: Option<DateTime<Utc>>,
}

/// A search hit: the matched entity plus its transient score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scored<T> {
    #[serde(flatten)]
    pub item: T,
    pub relevance_score: f64,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

/// Request-time restrictions on a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Restrict results to one content type, `None` searches all of them
    pub type_filter: Option<ContentType>,
    pub sort_by: SortBy,
}

impl SearchFilters {
    /// Whether results of `content_type` should be scored at all
    pub fn includes(&self, content_type: ContentType) -> bool {
        self.type_filter.is_none_or(|t| t == content_type)
    }
}

/// Search results bucketed by content type
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub topics: Vec<Scored<Topic>>,
    pub categories: Vec<Scored<Category>>,
    pub quizzes: Vec<Scored<Quiz>>,
    pub total: usize,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
