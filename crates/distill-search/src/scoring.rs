//! Text relevance scoring.
//!
//! A tiered heuristic rather than a statistical ranking model: the first rule
//! that matches decides the score, ties between records are expected.

/// Score for a case-insensitive exact match
pub const EXACT_SCORE: f64 = 100.0;
/// Score when the text starts with the query
pub const PREFIX_SCORE: f64 = 80.0;
/// Score when the query appears anywhere in the text
pub const SUBSTRING_SCORE: f64 = 50.0;
/// Ceiling for the word-overlap fallback, reached when every query word matches
pub const WORD_OVERLAP_MAX: f64 = 30.0;

/// Compute how well `text` matches `query`, in `[0, 100]`.
///
/// Rules, compared case-insensitively, first match wins:
///
/// * missing or empty text: 0
/// * exact match: 100
/// * text starts with the query: 80
/// * text contains the query: 50
/// * otherwise `matched_words / query_words * 30`, where a query word matches
///   when it appears anywhere in the text
///
/// No stemming, fuzzy matching or stopword removal is applied. Repeated query
/// words are counted once per occurrence.
///
/// # Examples
/// ```
/// use distill_search::score_match;
///
/// assert_eq!(score_match(Some("Transformer Architecture"), "transformer"), 80.0);
/// assert_eq!(score_match(None, "transformer"), 0.0);
/// ```
pub fn score_match(text: Option<&str>, query: &str) -> f64 {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return 0.0;
    };

    let text = text.to_lowercase();
    let query = query.to_lowercase();

    if text == query {
        return EXACT_SCORE;
    }
    if text.starts_with(&query) {
        return PREFIX_SCORE;
    }
    if text.contains(&query) {
        return SUBSTRING_SCORE;
    }

    let words: Vec<&str> = query.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let matched = words.iter().filter(|w| text.contains(*w)).count();
    if matched == 0 {
        return 0.0;
    }

    matched as f64 / words.len() as f64 * WORD_OVERLAP_MAX
}
