//! Search orchestration: score, filter, sort and bucket the index.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::{
    index::{SearchIndex, build_search_index},
    model::{Category, ContentType, Quiz, Scored, SearchFilters, SearchResults, SortBy, Topic},
    scoring::score_match,
    store::ContentStore,
};

/// Weight applied to description matches relative to title matches
pub const DESCRIPTION_WEIGHT: f64 = 0.7;
/// Weight applied to quiz question and option text matches
pub const QUIZ_TEXT_WEIGHT: f64 = 0.5;
/// Flat score for a topic whose tags contain the query
pub const TAG_SCORE: f64 = 40.0;

/// Run a global search across topics, categories and quizzes.
///
/// A blank query returns empty results without reading the store. Otherwise
/// the index is rebuilt from the store, every record of an included type is
/// scored, non-matching records are dropped, and each bucket is sorted on its
/// own according to `filters.sort_by`.
pub async fn perform_global_search<S>(
    store: &S,
    query: &str,
    filters: &SearchFilters,
) -> SearchResults
where
    S: ContentStore + ?Sized,
{
    let query = query.trim();
    if query.is_empty() {
        return SearchResults::default();
    }

    let index = build_search_index(store).await;
    let results = rank(index, query, filters);

    tracing::debug!(
        query,
        type_filter = ?filters.type_filter,
        sort_by = %filters.sort_by,
        total = results.total,
        "Global search complete"
    );

    results
}

/// Score and sort an already built index
pub fn rank(index: SearchIndex, query: &str, filters: &SearchFilters) -> SearchResults {
    let SearchIndex {
        topics,
        categories,
        quizzes,
    } = index;

    let mut topics = if filters.includes(ContentType::Topic) {
        collect_matches(topics, ContentType::Topic, |t| score_topic(t, query))
    } else {
        Vec::new()
    };
    let mut categories = if filters.includes(ContentType::Category) {
        collect_matches(categories, ContentType::Category, |c| {
            score_category(c, query)
        })
    } else {
        Vec::new()
    };
    let mut quizzes = if filters.includes(ContentType::Quiz) {
        collect_matches(quizzes, ContentType::Quiz, |q| score_quiz(q, query))
    } else {
        Vec::new()
    };

    sort_results(&mut topics, filters.sort_by);
    sort_results(&mut categories, filters.sort_by);
    sort_results(&mut quizzes, filters.sort_by);

    let total = topics.len() + categories.len() + quizzes.len();

    SearchResults {
        topics,
        categories,
        quizzes,
        total,
    }
}

/// Best of title, weighted description and tag matches
pub fn score_topic(topic: &Topic, query: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let tag_score = if topic
        .tags
        .iter()
        .any(|tag| tag.to_lowercase().contains(&query_lower))
    {
        TAG_SCORE
    } else {
        0.0
    };

    score_match(Some(&topic.title), query)
        .max(score_match(Some(&topic.description), query) * DESCRIPTION_WEIGHT)
        .max(tag_score)
}

/// Best of title and weighted description matches
pub fn score_category(category: &Category, query: &str) -> f64 {
    score_match(Some(&category.title), query)
        .max(score_match(Some(&category.description), query) * DESCRIPTION_WEIGHT)
}

/// Best of title, weighted description and weighted question text matches
pub fn score_quiz(quiz: &Quiz, query: &str) -> f64 {
    score_match(Some(&quiz.title), query)
        .max(score_match(Some(&quiz.description), query) * DESCRIPTION_WEIGHT)
        .max(score_match(Some(&quiz.quiz_text), query) * QUIZ_TEXT_WEIGHT)
}

fn collect_matches<T, F>(items: Vec<T>, content_type: ContentType, score: F) -> Vec<Scored<T>>
where
    F: Fn(&T) -> f64,
{
    items
        .into_iter()
        .filter_map(|item| {
            let relevance_score = score(&item);
            (relevance_score > 0.0).then_some(Scored {
                item,
                relevance_score,
                content_type,
            })
        })
        .collect()
}

/// Records that can be ordered by freshness
trait Timestamped {
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

impl Timestamped for Topic {
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

impl Timestamped for Category {
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

impl Timestamped for Quiz {
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

/// Stable sort, so equal keys keep index order
fn sort_results<T: Timestamped>(results: &mut [Scored<T>], sort_by: SortBy) {
    match sort_by {
        SortBy::Relevance => {
            results.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        }
        SortBy::LastUpdated => results.sort_by(|a, b| compare_recency(&a.item, &b.item)),
    }
}

/// Newest first; a missing timestamp counts as the epoch and sorts last
fn compare_recency<T: Timestamped>(a: &T, b: &T) -> Ordering {
    let epoch = DateTime::<Utc>::UNIX_EPOCH;
    let a = a.timestamp().unwrap_or(epoch);
    let b = b.timestamp().unwrap_or(epoch);
    b.cmp(&a)
}
