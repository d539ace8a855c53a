use axum::Router;

use crate::{category, search, section, state::ApiState, topic};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .merge(search::routes())
        .merge(category::routes())
        .merge(topic::routes())
        .merge(section::routes())
}
