//! HTTP request handlers.

pub(crate) mod assets;
pub(crate) mod pages;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::state::AppState;

/// The 404 page.
pub(crate) fn not_found(state: &AppState) -> Response {
    (StatusCode::NOT_FOUND, Html(state.not_found_page.clone())).into_response()
}
