use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use distill_search::{Category, Topic, index::normalize_topic, resolve_categories};

use crate::{ApiState, error::ApiError};

/// Create the category routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{category_id}", get(get_category))
        .route("/categories/{category_id}/topics", get(list_category_topics))
}

async fn list_categories(State(state): State<ApiState>) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = resolve_categories(state.store.as_ref()).await?;
    Ok(Json(categories.into_vec()))
}

async fn get_category(
    State(state): State<ApiState>,
    Path(category_id): Path<String>,
) -> Result<Json<Category>, ApiError> {
    let categories = resolve_categories(state.store.as_ref()).await?;

    categories
        .get(&category_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Category '{category_id}'")))
}

async fn list_category_topics(
    State(state): State<ApiState>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<Topic>>, ApiError> {
    let categories = resolve_categories(state.store.as_ref()).await?;
    if categories.get(&category_id).is_none() {
        return Err(ApiError::NotFound(format!("Category '{category_id}'")));
    }

    let topics = state
        .store
        .get_all_topics()
        .await?
        .into_iter()
        .filter(|t| t.category_id.as_deref() == Some(category_id.as_str()))
        .map(|t| normalize_topic(t, &categories))
        .collect();

    Ok(Json(topics))
}
