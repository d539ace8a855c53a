use distill_search::{ContentType, SortBy};

use crate::error::ApiError;

/// Type filter value meaning "no restriction"
const ALL_TYPES: &str = "all";

/// Validate the raw search query length
///
/// Length is counted in characters, not bytes, so non-Latin queries get the
/// same budget.
///
/// # Examples
/// ```
/// use distill_api::validation::validate_search_query;
///
/// assert!(validate_search_query("attention", 200).is_ok());
/// assert!(validate_search_query(&"a".repeat(201), 200).is_err());
/// ```
pub fn validate_search_query(query: &str, max_length: usize) -> Result<(), ApiError> {
    let length = query.chars().count();
    if length > max_length {
        return Err(ApiError::Validation(format!(
            "Search query is too long: {length} characters (maximum {max_length})"
        )));
    }

    Ok(())
}

/// Parse the `type` query parameter
///
/// Missing, blank or `all` means every content type.
pub fn parse_type_filter(raw: Option<&str>) -> Result<Option<ContentType>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case(ALL_TYPES) => Ok(None),
        Some(value) => Ok(Some(value.parse()?)),
    }
}

/// Parse the `sort` query parameter, defaulting to relevance
pub fn parse_sort_by(raw: Option<&str>) -> Result<SortBy, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(SortBy::default()),
        Some(value) => Ok(value.parse()?),
    }
}
