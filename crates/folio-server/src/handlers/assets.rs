//! Asset fallback.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use folio_site::{AssetRequest, AssetResponse, Outcome};

use crate::error::ServerError;
use crate::handlers::not_found;
use crate::state::AppState;

/// Fallback for every path no page route claimed.
pub(crate) async fn fallback(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    serve(&state, uri.path(), uri.query()).await
}

/// Serve a path through the asset layer, answering 404 when it declines.
pub(crate) async fn serve(
    state: &AppState,
    path: &str,
    query: Option<&str>,
) -> Result<Response, ServerError> {
    let request = AssetRequest::from_uri_parts(path, query);
    match state.assets.serve(&request).await {
        Outcome::Handled(response) => Ok(into_response(response)),
        Outcome::NotApplicable => Ok(not_found(state)),
        Outcome::Fatal(err) => Err(err.into()),
    }
}

fn into_response(response: AssetResponse) -> Response {
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::OK);
    (
        status,
        [(header::CONTENT_TYPE, response.content_type)],
        response.body,
    )
        .into_response()
}
