//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use folio_storage::StorageError;

/// Body of every 500 response. Carries no detail about the failure.
const ERROR_PAGE: &str = "<!DOCTYPE html>\
<html lang=\"en\"><head><meta charset=\"utf-8\" /><title>Error</title></head>\
<body><h1>Something went wrong</h1></body></html>";

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Content store failure other than a missing object.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use folio_storage::StorageErrorKind;

    use super::*;

    #[test]
    fn test_storage_error_is_generic_500() {
        let err = ServerError::from(
            StorageError::new(StorageErrorKind::PermissionDenied).with_path("secret/keys.md"),
        );

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_page_has_no_detail() {
        assert!(!ERROR_PAGE.contains("Storage"));
        assert!(!ERROR_PAGE.contains("Permission"));
    }
}
