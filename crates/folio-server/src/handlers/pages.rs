//! Splash and article pages.

use std::sync::Arc;

use axum::extract::{Path, RawQuery, State};
use axum::response::{Html, IntoResponse, Response};
use folio_renderer::derive_title;

use crate::error::ServerError;
use crate::handlers::{assets, not_found};
use crate::state::AppState;

/// Handle GET / and GET /articles/.
pub(crate) async fn splash(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.splash_page.clone())
}

/// Handle GET /articles/{slug}.
///
/// Images live next to the articles and are handed to the asset layer.
/// Anything else renders `articles/{slug}.md`.
pub(crate) async fn article(
    Path(slug): Path<String>,
    RawQuery(query): RawQuery,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    if slug.ends_with(".png") {
        let path = format!("/articles/{slug}");
        return assets::serve(&state, &path, query.as_deref()).await;
    }

    let title = derive_title(&slug);
    let path = format!("articles/{slug}.md");
    match state.pages.render_markdown_from_asset(&title, &path).await {
        Ok(page) => Ok(Html(page).into_response()),
        Err(err) if err.is_absent() => {
            tracing::debug!(path = %path, "Article not found");
            Ok(not_found(&state))
        }
        Err(err) => Err(err.into()),
    }
}
