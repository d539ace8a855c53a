use distill_search::SearchFilters;
use serde::Deserialize;

use crate::{error::ApiError, validation};

/// Query string of `GET /v1/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    /// Raw query text, blank means "no search"
    #[serde(default)]
    pub q: String,
    /// `topic`, `category`, `quiz` or `all`
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
    /// `relevance` or `lastUpdated`
    pub sort: Option<String>,
}

impl SearchParams {
    /// Validate the parameters and turn them into search filters
    pub fn filters(&self, max_query_length: usize) -> Result<SearchFilters, ApiError> {
        validation::validate_search_query(&self.q, max_query_length)?;

        Ok(SearchFilters {
            type_filter: validation::parse_type_filter(self.type_filter.as_deref())?,
            sort_by: validation::parse_sort_by(self.sort.as_deref())?,
        })
    }
}
