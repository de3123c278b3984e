//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::routing::get;
use tower::util::{MapRequest, MapRequestLayer};
use tower::{Layer, ServiceBuilder};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{rewrite, security};
use crate::state::AppState;

/// Request hook applied ahead of routing.
type RequestHook = fn(Request) -> Request;

/// The router wrapped in the pre-routing request hook.
pub(crate) type App = MapRequest<Router, RequestHook>;

/// Create the application router.
///
/// With the `.html` rewrite on, the dynamic article routes are left out:
/// the store then mirrors the statically rendered site and the fallback
/// serves every page.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::pages::splash))
        .route("/articles", get(handlers::pages::splash))
        .route("/articles/", get(handlers::pages::splash));

    if !state.html_rewrite {
        router = router.route("/articles/{slug}", get(handlers::pages::article));
    }

    router
        .fallback(handlers::assets::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}

/// Create the router wrapped so the `.html` rewrite, when enabled, runs
/// before route matching.
pub(crate) fn create_app(state: Arc<AppState>) -> App {
    let hook: RequestHook = if state.html_rewrite {
        rewrite::rewrite_request
    } else {
        rewrite::passthrough
    };
    MapRequestLayer::new(hook).layer(create_router(state))
}
