use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};

/// Topic row - one handbook page
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TopicRow {
    /// Slug identifier (e.g. `transformer-architecture`)
    pub topic_id: String,
    /// Owning category, nullable for unfiled topics
    pub category_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Free-form labels (`TEXT[]`, never NULL)
    pub tags: Vec<String>,
    pub difficulty: Option<String>,
    /// Human readable estimate such as `"12 min"`
    pub read_time: Option<String>,
    /// Handbook body (JSONB)
    pub content: Json<serde_json::Value>,
    /// When the topic content last changed, NULL when never edited
    pub updated_at: Option<DateTime<Utc>>,
}

/// Category row - groups topics
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CategoryRow {
    pub category_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Icon name resolved by the frontend's icon table
    pub icon: Option<String>,
    /// Styling token (e.g. a gradient class)
    pub color: Option<String>,
}

/// Section row - groups categories on the landing page
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SectionRow {
    pub section_id: String,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
}
