use axum::{Json, Router, extract::State, routing::get};
use distill_search::Section;

use crate::{ApiState, error::ApiError};

/// Create the section routes
pub fn routes() -> Router<ApiState> {
    Router::new().route("/sections", get(list_sections))
}

/// Handbook sections ordered by position
async fn list_sections(State(state): State<ApiState>) -> Result<Json<Vec<Section>>, ApiError> {
    let mut sections = state.store.get_all_sections().await?;
    sections.sort_by_key(|s| s.position);
    Ok(Json(sections.into_iter().map(Section::from).collect()))
}
