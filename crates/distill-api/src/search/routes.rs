use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use distill_search::{SearchResults, perform_global_search};

use crate::{ApiState, error::ApiError, metrics};

use super::model::SearchParams;

/// Create the search routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/search", get(global_search))
}

/// Search topics, categories and quizzes
///
/// A blank `q` returns an empty result set without touching the store.
async fn global_search(
    State(state): State<ApiState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let filters = params.filters(state.search_max_query_length)?;

    let start = Instant::now();
    let results = perform_global_search(state.store.as_ref(), &params.q, &filters).await;
    let elapsed = start.elapsed();

    metrics::record_search(&filters, results.total, elapsed.as_secs_f64());
    tracing::info!(
        total = results.total,
        topics = results.topics.len(),
        categories = results.categories.len(),
        quizzes = results.quizzes.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Search served"
    );

    Ok(Json(results))
}
