use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use distill_search::{
    CategoryMap, Quiz, Topic,
    index::{derive_quiz, normalize_topic},
};

use crate::{ApiState, error::ApiError};

/// Create the topic routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/topics", get(list_topics))
        .route("/topics/{topic_id}", get(get_topic))
        .route("/topics/{topic_id}/quiz", get(get_topic_quiz))
}

/// Load every topic with its category title filled in
///
/// Unlike search, a failed category load is an error here: a catalog page
/// with blank category titles is worse than a retry.
async fn load_topics(state: &ApiState) -> Result<Vec<Topic>, ApiError> {
    let (categories, topics) =
        tokio::join!(state.store.get_all_categories(), state.store.get_all_topics());
    let categories = CategoryMap::from_records(categories?);

    Ok(topics?
        .into_iter()
        .map(|t| normalize_topic(t, &categories))
        .collect())
}

async fn find_topic(state: &ApiState, topic_id: &str) -> Result<Topic, ApiError> {
    load_topics(state)
        .await?
        .into_iter()
        .find(|t| t.id == topic_id)
        .ok_or_else(|| ApiError::NotFound(format!("Topic '{topic_id}'")))
}

async fn list_topics(State(state): State<ApiState>) -> Result<Json<Vec<Topic>>, ApiError> {
    Ok(Json(load_topics(&state).await?))
}

async fn get_topic(
    State(state): State<ApiState>,
    Path(topic_id): Path<String>,
) -> Result<Json<Topic>, ApiError> {
    Ok(Json(find_topic(&state, &topic_id).await?))
}

async fn get_topic_quiz(
    State(state): State<ApiState>,
    Path(topic_id): Path<String>,
) -> Result<Json<Quiz>, ApiError> {
    let topic = find_topic(&state, &topic_id).await?;

    derive_quiz(&topic)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Quiz for topic '{topic_id}'")))
}
