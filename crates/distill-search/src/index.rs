//! Per-call search index.
//!
//! The index is rebuilt from the content store for every search and dropped
//! afterwards. Category and topic loads fail independently: a failed load is
//! logged and that part of the index is left empty, so the rest of the search
//! keeps working.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::{
    category::CategoryMap,
    model::{Category, Quiz, Topic, TopicRecord},
    store::ContentStore,
};

/// Normalized records available for scoring
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    pub topics: Vec<Topic>,
    pub categories: Vec<Category>,
    pub quizzes: Vec<Quiz>,
}

/// Build the search index from a fresh read of the content store.
///
/// Never fails. Categories and topics are loaded concurrently; when either
/// load fails the error is logged and that list degrades to empty. Topics
/// whose category is unknown (or whose categories failed to load) get an
/// empty category title.
pub async fn build_search_index<S>(store: &S) -> SearchIndex
where
    S: ContentStore + ?Sized,
{
    let (categories, topics) = tokio::join!(store.get_all_categories(), store.get_all_topics());

    let categories = match categories {
        Ok(records) => CategoryMap::from_records(records),
        Err(e) => {
            tracing::error!("Failed to load categories for search index: {e}");
            CategoryMap::default()
        }
    };

    let topic_records = topics.unwrap_or_else(|e| {
        tracing::error!("Failed to load topics for search index: {e}");
        Vec::new()
    });

    let mut index = SearchIndex {
        topics: Vec::with_capacity(topic_records.len()),
        categories: Vec::new(),
        quizzes: Vec::new(),
    };

    for record in topic_records {
        let topic = normalize_topic(record, &categories);
        if let Some(quiz) = derive_quiz(&topic) {
            index.quizzes.push(quiz);
        }
        index.topics.push(topic);
    }

    index.categories = categories.into_vec();

    tracing::debug!(
        topics = index.topics.len(),
        categories = index.categories.len(),
        quizzes = index.quizzes.len(),
        "Search index built"
    );

    index
}

/// Normalize a topic record, copying in its category title
pub fn normalize_topic(record: TopicRecord, categories: &CategoryMap) -> Topic {
    let category_title = categories.title_of(record.category_id.as_deref()).to_string();
    let last_updated = record.updated_at.as_deref().and_then(parse_timestamp);

    Topic {
        id: record.topic_id,
        title: record.title,
        description: record.description.unwrap_or_default(),
        tags: record.tags,
        difficulty: record.difficulty,
        read_time: record.read_time,
        last_updated,
        category_id: record.category_id,
        category_title,
        content: record.content,
    }
}

/// Synthesize the quiz embedded in a topic's content, if it has one.
///
/// A quiz exists only when `content.quiz` is a non-empty array. Its text is
/// every question followed by its options, all joined by single spaces.
/// Options may be plain strings or objects with a `text` field.
pub fn derive_quiz(topic: &Topic) -> Option<Quiz> {
    let questions = topic
        .content
        .get("quiz")
        .and_then(Value::as_array)
        .filter(|q| !q.is_empty())?;

    let mut parts: Vec<&str> = Vec::new();
    for question in questions {
        if let Some(text) = question.get("question").and_then(Value::as_str) {
            parts.push(text);
        }
        if let Some(options) = question.get("options").and_then(Value::as_array) {
            parts.extend(options.iter().filter_map(option_text));
        }
    }

    Some(Quiz {
        id: format!("{}-quiz", topic.id),
        topic_id: topic.id.clone(),
        title: format!("{} Quiz", topic.title),
        description: topic.description.clone(),
        difficulty: topic.difficulty.clone(),
        category_id: topic.category_id.clone(),
        category_title: topic.category_title.clone(),
        question_count: questions.len(),
        quiz_text: parts.join(" "),
        last_updated: topic.last_updated,
    })
}

fn option_text(option: &Value) -> Option<&str> {
    match option {
        Value::String(s) => Some(s.as_str()),
        Value::Object(o) => o.get("text").and_then(Value::as_str),
        _ => None,
    }
}

/// Parse a store timestamp, accepting the formats the backend has produced.
///
/// RFC 3339 first, then offset date-times the way Postgres prints them
/// (`+00`, `+0000` or `+00:00`, seconds optional), then naive date-times
/// (assumed UTC) with a space or `T` separator, then a bare date at midnight.
/// Anything else is treated as missing.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(raw, format) {
            return Some(ts.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// `%#z` takes `Z`, `+00`, `+0000` and `+00:00`
const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%dT%H:%M%#z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::CategoryRecord, store::MemoryStore};
    use chrono::TimeZone;
    use serde_json::json;

    fn topic_record(id: &str, title: &str, category_id: &str, content: Value) -> TopicRecord {
        TopicRecord {
            topic_id: id.to_string(),
            title: title.to_string(),
            description: Some(format!("About {title}")),
            tags: vec!["Theory".to_string()],
            difficulty: Some("Intermediate".to_string()),
            read_time: Some("12 min".to_string()),
            updated_at: Some("2024-03-01T10:00:00Z".to_string()),
            category_id: Some(category_id.to_string()),
            content,
        }
    }

    fn category_record(id: &str, title: &str) -> CategoryRecord {
        CategoryRecord {
            category_id: id.to_string(),
            title: title.to_string(),
            description: Some(format!("All about {title}")),
            icon: Some("Brain".to_string()),
            color: None,
        }
    }

    #[tokio::test]
    async fn test_build_index_denormalizes_category_title() {
        let store = MemoryStore::new()
            .with_categories(vec![category_record("llms", "Large Language Models")])
            .with_topics(vec![
                topic_record("t1", "Transformer Architecture", "llms", json!({})),
                topic_record("t2", "Orphan Topic", "missing", json!({})),
            ]);

        let index = build_search_index(&store).await;

        assert_eq!(index.categories.len(), 1);
        assert!(index.categories[0].last_updated.is_none());
        assert_eq!(index.topics.len(), 2);
        assert_eq!(index.topics[0].category_title, "Large Language Models");
        assert_eq!(index.topics[1].category_title, "");
        assert!(index.quizzes.is_empty());
    }

    #[tokio::test]
    async fn test_build_index_keeps_store_order() {
        let store = MemoryStore::new().with_topics(vec![
            topic_record("b", "Beta", "x", json!({})),
            topic_record("a", "Alpha", "x", json!({})),
        ]);

        let index = build_search_index(&store).await;
        let ids: Vec<&str> = index.topics.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_category_failure_degrades_to_blank_titles() {
        let store = MemoryStore::new()
            .failing_categories()
            .with_topics(vec![topic_record(
                "t1",
                "Transformer Architecture",
                "llms",
                json!({}),
            )]);

        let index = build_search_index(&store).await;

        assert!(index.categories.is_empty());
        assert_eq!(index.topics.len(), 1);
        assert_eq!(index.topics[0].category_title, "");
        assert_eq!(store.topic_loads(), 1);
    }

    #[tokio::test]
    async fn test_topic_failure_keeps_categories() {
        let store = MemoryStore::new()
            .failing_topics()
            .with_categories(vec![category_record("ml", "Machine Learning")]);

        let index = build_search_index(&store).await;

        assert_eq!(index.categories.len(), 1);
        assert!(index.topics.is_empty());
        assert!(index.quizzes.is_empty());
        assert_eq!(store.category_loads(), 1);
    }

    #[test]
    fn test_quiz_derivation() {
        let categories = CategoryMap::from_records(vec![category_record("llms", "LLMs")]);
        let content = json!({
            "sections": [],
            "quiz": [
                { "question": "What does attention compute?", "options": ["Weights", "Gradients"] },
                { "question": "Who introduced transformers?", "options": [{ "text": "Vaswani et al." }] }
            ]
        });
        let topic = normalize_topic(
            topic_record("t1", "Transformer Architecture", "llms", content),
            &categories,
        );

        let quiz = derive_quiz(&topic).expect("topic has a quiz");

        assert_eq!(quiz.id, "t1-quiz");
        assert_eq!(quiz.topic_id, "t1");
        assert_eq!(quiz.title, "Transformer Architecture Quiz");
        assert_eq!(quiz.category_title, "LLMs");
        assert_eq!(quiz.question_count, 2);
        assert_eq!(
            quiz.quiz_text,
            "What does attention compute? Weights Gradients Who introduced transformers? Vaswani et al."
        );
        assert_eq!(quiz.last_updated, topic.last_updated);
    }

    #[test]
    fn test_no_quiz_for_empty_or_absent_array() {
        let categories = CategoryMap::default();

        let empty = normalize_topic(topic_record("t1", "A", "x", json!({ "quiz": [] })), &categories);
        assert!(derive_quiz(&empty).is_none());

        let absent = normalize_topic(topic_record("t2", "B", "x", json!({ "body": "text" })), &categories);
        assert!(derive_quiz(&absent).is_none());

        let null_content = normalize_topic(topic_record("t3", "C", "x", Value::Null), &categories);
        assert!(derive_quiz(&null_content).is_none());

        let not_array = normalize_topic(topic_record("t4", "D", "x", json!({ "quiz": "soon" })), &categories);
        assert!(derive_quiz(&not_array).is_none());
    }

    #[tokio::test]
    async fn test_one_quiz_per_topic_with_questions() {
        let quiz = json!({ "quiz": [{ "question": "Q1", "options": ["A"] }, { "question": "Q2", "options": [] }, { "question": "Q3" }] });
        let store = MemoryStore::new().with_topics(vec![
            topic_record("t1", "With Quiz", "x", quiz),
            topic_record("t2", "Without Quiz", "x", json!({})),
        ]);

        let index = build_search_index(&store).await;

        assert_eq!(index.quizzes.len(), 1);
        assert_eq!(index.quizzes[0].question_count, 3);
        assert_eq!(index.quizzes[0].quiz_text, "Q1 A Q2 Q3");
    }

    #[test]
    fn test_parse_timestamp() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-03-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T11:00:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:00:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 10:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("last week"), None);
    }

    #[test]
    fn test_parse_timestamp_with_offsets() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();

        // Postgres timestamptz text output
        assert_eq!(parse_timestamp("2024-03-01 10:00:00+00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 12:00:00.000+02"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:00:00+0000"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T05:30:00-0430"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 11:00:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01T10:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-01 11:00+01"), Some(expected));
    }
}
