use std::sync::Arc;

use distill_search::ContentStore;
use sqlx::PgPool;

use crate::{config::ApiConfig, store::PgContentStore};

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn ContentStore>,
    pub search_max_query_length: usize,
}

impl ApiState {
    /// State backed by PostgreSQL
    pub fn new(config: &ApiConfig, pool: PgPool) -> Self {
        Self::with_store(Arc::new(PgContentStore::new(pool)), config)
    }

    /// State backed by any content store
    pub fn with_store(store: Arc<dyn ContentStore>, config: &ApiConfig) -> Self {
        Self {
            store,
            search_max_query_length: config.search_max_query_length,
        }
    }
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("search_max_query_length", &self.search_max_query_length)
            .finish_non_exhaustive()
    }
}
