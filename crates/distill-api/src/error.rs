use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use distill_search::{ParseError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Store(e) = &self {
            tracing::error!("Content store request failed: {e}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("topic".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::Unavailable("topics".to_string())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_parse_error_is_validation() {
        let err = ApiError::from(ParseError::SortBy("newest".to_string()));
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(err.to_string().contains("newest"));
    }
}
